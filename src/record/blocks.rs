//! Color block segmentation
//!
//! Walks the stitch stream once and splits it into color blocks. A block is
//! closed by STOP (machine pause, same thread stays mounted) or COLOR_CHANGE
//! (next thread); END terminates the walk. Trailing stitches with no
//! terminator form a final block.

use crate::core::constants::*;
use crate::core::pattern::EmbPattern;
use crate::core::thread::EmbThread;

/// One color block of the design
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBlock {
    /// Thread for this block, clamped to the last thread when the stream
    /// has more blocks than the thread list; `None` only when the pattern
    /// carries no threads at all
    pub thread: Option<EmbThread>,
    /// True when a STOP command closed this block
    pub stop_flag: bool,
    /// STITCH commands inside the block
    pub stitch_count: usize,
}

/// Segment a pattern's stream into color blocks
pub fn segment_blocks(pattern: &EmbPattern) -> Vec<ColorBlock> {
    let threads = pattern.threads();
    let mut blocks = Vec::new();
    let mut thread_index = 0usize;
    let mut stitch_count = 0usize;

    let thread_at = |index: usize| -> Option<EmbThread> {
        if threads.is_empty() {
            None
        } else {
            Some(threads[index.min(threads.len() - 1)].clone())
        }
    };

    for stitch in pattern.stitches() {
        match extract_command(stitch.command) {
            STITCH => stitch_count += 1,
            STOP => {
                blocks.push(ColorBlock {
                    thread: thread_at(thread_index),
                    stop_flag: true,
                    stitch_count,
                });
                stitch_count = 0;
            }
            COLOR_CHANGE => {
                blocks.push(ColorBlock {
                    thread: thread_at(thread_index),
                    stop_flag: false,
                    stitch_count,
                });
                stitch_count = 0;
                if !threads.is_empty() {
                    thread_index = (thread_index + 1).min(threads.len() - 1);
                }
            }
            END => break,
            // Jumps, trims, sequins, appliques do not affect segmentation
            _ => {}
        }
    }

    if stitch_count > 0 {
        blocks.push(ColorBlock {
            thread: thread_at(thread_index),
            stop_flag: false,
            stitch_count,
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::thread::EmbThread;

    fn two_thread_pattern() -> EmbPattern {
        let mut pattern = EmbPattern::new();
        pattern.add_thread(EmbThread::from_rgb(255, 0, 0));
        pattern.add_thread(EmbThread::from_rgb(0, 0, 255));
        pattern
    }

    #[test]
    fn test_color_change_splits_and_advances() {
        let mut pattern = two_thread_pattern();
        pattern.stitch_abs(0.0, 0.0);
        pattern.stitch_abs(100.0, 0.0);
        pattern.stitch_abs(100.0, 100.0);
        pattern.color_change(0.0, 0.0);
        pattern.stitch_abs(200.0, 100.0);
        pattern.stitch_abs(200.0, 200.0);
        pattern.end();

        let blocks = segment_blocks(&pattern);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].stitch_count, 3);
        assert_eq!(blocks[1].stitch_count, 2);
        assert!(!blocks[0].stop_flag);
        assert_eq!(blocks[0].thread.as_ref().unwrap().color, 0xFF0000);
        assert_eq!(blocks[1].thread.as_ref().unwrap().color, 0x0000FF);
    }

    #[test]
    fn test_stop_keeps_thread() {
        let mut pattern = two_thread_pattern();
        pattern.stitch_abs(0.0, 0.0);
        pattern.stitch_abs(10.0, 0.0);
        pattern.stop();
        pattern.stitch_abs(20.0, 0.0);
        pattern.end();

        let blocks = segment_blocks(&pattern);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].stop_flag);
        assert!(!blocks[1].stop_flag);
        // STOP does not advance the thread index
        assert_eq!(blocks[1].thread.as_ref().unwrap().color, 0xFF0000);
    }

    #[test]
    fn test_end_discards_trailing_commands() {
        let mut pattern = two_thread_pattern();
        pattern.stitch_abs(0.0, 0.0);
        pattern.end();
        pattern.stitch_abs(10.0, 0.0);
        pattern.color_change(0.0, 0.0);

        let blocks = segment_blocks(&pattern);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].stitch_count, 1);
    }

    #[test]
    fn test_terminator_with_no_trailing_stitch() {
        let mut pattern = two_thread_pattern();
        pattern.stitch_abs(0.0, 0.0);
        pattern.color_change(0.0, 0.0);
        pattern.end();

        let blocks = segment_blocks(&pattern);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_thread_clamps_past_list_end() {
        let mut pattern = EmbPattern::new();
        pattern.add_thread(EmbThread::from_rgb(1, 2, 3));
        pattern.stitch_abs(0.0, 0.0);
        pattern.color_change(0.0, 0.0);
        pattern.stitch_abs(10.0, 0.0);
        pattern.color_change(0.0, 0.0);
        pattern.stitch_abs(20.0, 0.0);
        pattern.end();

        let blocks = segment_blocks(&pattern);
        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            assert_eq!(block.thread.as_ref().unwrap().color, 0x010203);
        }
    }

    #[test]
    fn test_no_threads_yields_none() {
        let mut pattern = EmbPattern::new();
        pattern.stitch_abs(0.0, 0.0);
        pattern.end();

        let blocks = segment_blocks(&pattern);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].thread.is_none());
    }

    #[test]
    fn test_jump_and_trim_ignored() {
        let mut pattern = two_thread_pattern();
        pattern.stitch_abs(0.0, 0.0);
        pattern.jump(50.0, 0.0);
        pattern.trim();
        pattern.stitch_abs(100.0, 0.0);
        pattern.end();

        let blocks = segment_blocks(&pattern);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].stitch_count, 2);
    }

    #[test]
    fn test_empty_pattern_has_no_blocks() {
        let pattern = EmbPattern::new();
        assert!(segment_blocks(&pattern).is_empty());
    }
}
