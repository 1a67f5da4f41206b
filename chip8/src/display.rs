use chip8_vm::FrameBuffer;

const ON: char = '#';
const OFF: char = '.';

/// Formats a Chip-8 FrameBuffer for a terminal.
///
/// Each row of the FrameBuffer becomes a line of text, with lit pixels drawn as `#` and dark
/// pixels as `.`.
///
/// # Arguments
/// * `frame` a Chip-8 FrameBuffer
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    frame
        .iter()
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel == 0 { OFF } else { ON })
                .chain(std::iter::once('\n'))
                .collect::<String>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_text() {
        let mut frame: FrameBuffer = [[0; 64]; 32];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let text = frame_to_text(&frame);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(lines.iter().all(|line| line.len() == 64));
        assert!(lines[0].starts_with(".#."));
        assert!(lines[1].starts_with("#.."));
        assert_eq!(text.matches('#').count(), 2);
    }
}
