//! Per-color descriptor building
//!
//! Turns segmented color blocks into the record's color descriptors:
//! catalog-code normalization for the charts that encode shade pairs,
//! color-way extraction, hex formatting, and the stop annotation on the
//! display name.

use crate::core::thread::rgb_to_hex;
use crate::record::blocks::ColorBlock;
use crate::record::ColorRecord;

/// Charts whose catalog numbers are `<a>-<b>` shade pairs displayed as the
/// smaller number
const PAIRED_CHARTS: [&str; 2] = ["Metro Pro", "Lemiex"];

/// Normalize a catalog code for display
///
/// For paired charts, `"512-7"` and `"7-512"` both display as `"7"`.
/// Anything that is not exactly two dash-separated integers passes through.
fn display_code(chart: &str, code: &str) -> String {
    if !PAIRED_CHARTS.contains(&chart) || !code.contains('-') {
        return code.to_string();
    }

    let parts: Vec<&str> = code.split('-').collect();
    if parts.len() == 2 {
        if let (Ok(a), Ok(b)) = (parts[0].parse::<i64>(), parts[1].parse::<i64>()) {
            return a.min(b).to_string();
        }
    }
    code.to_string()
}

/// Color-way suffix: the part of the catalog code after the first dash
fn color_way(code: &str) -> String {
    match code.split_once('-') {
        Some((_, rest)) => rest.to_string(),
        None => code.to_string(),
    }
}

/// Build the color descriptor list from segmented blocks
pub fn build_color_records(blocks: &[ColorBlock]) -> Vec<ColorRecord> {
    blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            let thread = block.thread.as_ref();
            let rgb_int = thread.map(|t| t.color).unwrap_or(0);

            let code = thread
                .and_then(|t| t.catalog_number.clone())
                .unwrap_or_default();
            // Chart label: brand when present, the chart field otherwise
            let chart = thread
                .and_then(|t| t.brand.clone().or_else(|| t.chart.clone()))
                .unwrap_or_default();
            let mut name = thread
                .and_then(|t| t.description.clone())
                .unwrap_or_default();

            if block.stop_flag {
                if name.is_empty() {
                    name = "Stop".to_string();
                } else {
                    name = format!("{}, Stop", name);
                }
            }

            ColorRecord {
                sequence: idx + 1,
                needle_number: None,
                code: display_code(&chart, &code),
                color_way: color_way(&code),
                original_code: code,
                name,
                chart,
                rgb_int,
                rgb_hex: rgb_to_hex(rgb_int),
                stitch_count: block.stitch_count,
                stop_flag: block.stop_flag,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::thread::EmbThread;

    fn block(thread: Option<EmbThread>, stop_flag: bool, stitch_count: usize) -> ColorBlock {
        ColorBlock {
            thread,
            stop_flag,
            stitch_count,
        }
    }

    #[test]
    fn test_display_code_paired_charts() {
        assert_eq!(display_code("Metro Pro", "512-7"), "7");
        assert_eq!(display_code("Metro Pro", "7-512"), "7");
        assert_eq!(display_code("Lemiex", "100-20"), "20");
        // Other charts pass through
        assert_eq!(display_code("Madeira", "512-7"), "512-7");
        // Non-numeric pairs pass through
        assert_eq!(display_code("Metro Pro", "5a-7"), "5a-7");
        // More than two parts pass through
        assert_eq!(display_code("Metro Pro", "1-2-3"), "1-2-3");
        assert_eq!(display_code("Metro Pro", "512"), "512");
    }

    #[test]
    fn test_color_way() {
        assert_eq!(color_way("1234-5678"), "5678");
        assert_eq!(color_way("1234"), "1234");
        assert_eq!(color_way(""), "");
        assert_eq!(color_way("1-2-3"), "2-3");
    }

    #[test]
    fn test_records_from_blocks() {
        let thread = EmbThread::from_rgb(0xAB, 0x12, 0xCD)
            .with_catalog_number("512-7")
            .with_description("Slate")
            .with_brand("Metro Pro");
        let records = build_color_records(&[
            block(Some(thread), false, 42),
            block(None, false, 7),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, 1);
        assert_eq!(records[0].code, "7");
        assert_eq!(records[0].original_code, "512-7");
        assert_eq!(records[0].color_way, "7");
        assert_eq!(records[0].rgb_hex, "#AB12CD");
        assert_eq!(records[0].stitch_count, 42);
        assert_eq!(records[0].needle_number, None);

        // Threadless block falls back to color 0
        assert_eq!(records[1].sequence, 2);
        assert_eq!(records[1].rgb_int, 0);
        assert_eq!(records[1].rgb_hex, "#000000");
        assert_eq!(records[1].code, "");
    }

    #[test]
    fn test_chart_field_labels_when_brand_absent() {
        let thread = EmbThread::from_rgb(10, 20, 30)
            .with_catalog_number("512-7")
            .with_chart("Metro Pro");
        let records = build_color_records(&[block(Some(thread), false, 1)]);

        assert_eq!(records[0].chart, "Metro Pro");
        assert_eq!(records[0].code, "7");

        // Brand wins when both are set
        let thread = EmbThread::from_rgb(10, 20, 30)
            .with_catalog_number("512-7")
            .with_brand("Madeira")
            .with_chart("Metro Pro");
        let records = build_color_records(&[block(Some(thread), false, 1)]);
        assert_eq!(records[0].chart, "Madeira");
        assert_eq!(records[0].code, "512-7");
    }

    #[test]
    fn test_stop_annotation() {
        let gold = EmbThread::from_rgb(255, 215, 0).with_description("Gold");
        let records = build_color_records(&[
            block(Some(gold), true, 5),
            block(Some(EmbThread::from_rgb(1, 2, 3)), true, 5),
        ]);

        assert_eq!(records[0].name, "Gold, Stop");
        assert!(records[0].stop_flag);
        // Empty description becomes bare "Stop"
        assert_eq!(records[1].name, "Stop");
    }
}
