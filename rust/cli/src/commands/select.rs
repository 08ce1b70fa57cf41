use crate::error::CliError;
use namewheel_engine::selection::{pointer_angle, select_winner, slice_bounds};
use std::io::Write;

/// Prints the slice under the pointer for `rotation` degrees on a wheel of
/// `count` slices.
pub fn handle_select_command(
    rotation: f64,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let index = select_winner(rotation, count)?;
    let pointer = pointer_angle(rotation, count)?;
    let (start, end) = slice_bounds(index, count)?;
    writeln!(out, "Winner index: {}", index)?;
    writeln!(
        out,
        "Pointer at {:.3} deg, slice spans [{:.3}, {:.3})",
        pointer, start, end
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use namewheel_engine::errors::WheelError;

    #[test]
    fn quarter_turn_on_four_slices_is_last_index() {
        let mut out = Vec::new();
        handle_select_command(90.0, 4, &mut out).expect("select");
        let output = String::from_utf8(out).expect("utf8");
        assert!(output.starts_with("Winner index: 3\n"));
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut out = Vec::new();
        let result = handle_select_command(90.0, 0, &mut out);
        assert!(matches!(
            result,
            Err(CliError::Wheel(WheelError::InvalidEntryCount(0)))
        ));
        assert!(out.is_empty());
    }
}
