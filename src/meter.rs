use crate::ocr::TextBlock;
use log::warn;

// The pump display reads out as four lines; the amount (tenths of a rupee)
// sits on line 1 and the volume in litres on line 3. Any deviation from that
// layout is treated as unparseable rather than guessed at.
// TODO: validate the index mapping against captures from the real display;
// only one unit has been observed so far.
const AMOUNT_LINE: usize = 1;
const VOLUME_LINE: usize = 3;

/// Extracts `(amount, volume)` from a meter capture's OCR output.
pub fn parse_meter(blocks: &[TextBlock]) -> (Option<f64>, Option<f64>) {
    match try_parse(blocks) {
        Some(reading) => reading,
        None => {
            warn!("Could not parse meter reading from OCR output");
            (None, None)
        }
    }
}

fn try_parse(blocks: &[TextBlock]) -> Option<(Option<f64>, Option<f64>)> {
    let lines = &blocks.first()?.lines;
    let amount: f64 = numeric(lines.get(AMOUNT_LINE)?)?;
    let volume: f64 = numeric(lines.get(VOLUME_LINE)?)?;
    Some((Some(amount / 10.0), Some(volume)))
}

// Seven-segment OCR tends to insert spaces between digits.
fn numeric(line: &str) -> Option<f64> {
    line.replace(' ', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> TextBlock {
        TextBlock {
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }

    #[test]
    fn fixed_layout_parses_amount_and_volume() {
        let (amount, volume) = parse_meter(&[block(&["header", "1050", "mid", "12.5"])]);
        assert_eq!(amount, Some(105.0));
        assert_eq!(volume, Some(12.5));
    }

    #[test]
    fn embedded_spaces_are_stripped() {
        let (amount, volume) = parse_meter(&[block(&["RATE", "1 0 5 0", "SALE", "1 2.5"])]);
        assert_eq!(amount, Some(105.0));
        assert_eq!(volume, Some(12.5));
    }

    #[test]
    fn too_few_lines_reads_as_absent() {
        assert_eq!(parse_meter(&[block(&["1050", "12.5"])]), (None, None));
        assert_eq!(parse_meter(&[]), (None, None));
    }

    #[test]
    fn non_numeric_lines_read_as_absent() {
        assert_eq!(
            parse_meter(&[block(&["a", "b", "c", "d"])]),
            (None, None)
        );
    }
}
