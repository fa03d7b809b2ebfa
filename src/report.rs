use std::fmt;
use std::time::Duration;
use crate::error::Error;
use crate::grid::Grid;
use crate::index_space::IndexSpace;




/**
 * Timing summary of a completed run.
 */
pub struct Report {
    pub width: usize,
    pub height: usize,
    pub steps: usize,
    pub elapsed: Duration,
}




// ============================================================================
impl Report {

    pub fn usecs(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e6
    }

    /**
     * Floating point throughput, counting nine operations per grid point and
     * step (four multiplies, four adds and the center weight).
     */
    pub fn mflops(&self) -> f64 {
        let usecs = self.usecs();
        if usecs > 0.0 {
            9.0 * (self.steps * self.width * self.height) as f64 / usecs
        } else {
            0.0
        }
    }

    /**
     * Interior points updated per second. The historical formula,
     * `usecs * 1e6 / width * height * steps`, divides by the width only and
     * multiplies time into the numerator; it does not measure points per
     * second and is not reproduced here.
     */
    pub fn cells_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        let cells = self.width.saturating_sub(2) * self.height.saturating_sub(2);
        if secs > 0.0 {
            (cells * self.steps) as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(fmt, "# steps = {}", self.steps)?;
        writeln!(fmt, "# time = {} usecs.", format_g(self.usecs(), 6))?;
        writeln!(fmt, "# performance = {:.4} Mflops", self.mflops())?;
        writeln!(fmt, "# cells = {} cells per second.", format_g(self.cells_per_second(), 6))
    }
}




/**
 * Format a number the way C's `%.<precision>g` does: `precision` significant
 * digits, scientific notation for very small or large magnitudes, and no
 * trailing zeros.
 */
pub fn format_g(value: f64, precision: usize) -> String {
    let p = precision.max(1);

    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.*e}", p - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}




/**
 * Render the values of a grid inside a window, one line per row from top to
 * bottom, each value right-aligned in eight columns with five significant
 * digits.
 */
pub fn display_window(grid: &Grid, window: &IndexSpace) -> Result<String, Error> {
    if !grid.space().contains_space(window) {
        return Err(Error::WindowOutOfRange);
    }
    let mut out = String::new();

    for y in window.rows() {
        for x in window.columns() {
            out.push_str(&format!("{:>8} ", format_g(grid.get(x, y), 5)));
        }
        out.push('\n');
    }
    Ok(out)
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::time::Duration;
    use super::{display_window, format_g, Report};
    use crate::error::Error;
    use crate::grid::Grid;
    use crate::index_space::range2d_inclusive;
    use crate::init::ramp;

    #[test]
    fn format_g_matches_c_printf() {
        assert_eq!(format_g(0.0, 5), "0");
        assert_eq!(format_g(5.0, 5), "5");
        assert_eq!(format_g(0.04, 5), "0.04");
        assert_eq!(format_g(1234.5678, 5), "1234.6");
        assert_eq!(format_g(123456.0, 5), "1.2346e+05");
        assert_eq!(format_g(0.00001234, 5), "1.234e-05");
        assert_eq!(format_g(-2.5, 5), "-2.5");
        assert_eq!(format_g(99999.5, 5), "1e+05");
        assert_eq!(format_g(1500000.0, 6), "1.5e+06");
    }

    #[test]
    fn window_of_ramp() {
        let mut grid = Grid::new(5, 5).unwrap();
        ramp(&mut grid);
        let text = display_window(&grid, &range2d_inclusive(0, 4, 0, 1).unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "       0        1        2        3        5 ");
        assert_eq!(lines[1], "       1        0        0        0        4 ");
    }

    #[test]
    fn window_outside_grid_is_rejected() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(matches!(display_window(&grid, &range2d_inclusive(0, 5, 0, 0).unwrap()), Err(Error::WindowOutOfRange)));
    }

    #[test]
    fn report_lines_keep_their_order() {
        let report = Report { width: 10, height: 10, steps: 100, elapsed: Duration::from_millis(2) };
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "# steps = 100");
        assert_eq!(lines[1], "# time = 2000 usecs.");
        assert_eq!(lines[2], "# performance = 45.0000 Mflops");
        assert_eq!(lines[3], "# cells = 3.2e+06 cells per second.");
    }

    #[test]
    fn zero_elapsed_time_reports_zero_rates() {
        let report = Report { width: 10, height: 10, steps: 0, elapsed: Duration::ZERO };
        assert_eq!(report.mflops(), 0.0);
        assert_eq!(report.cells_per_second(), 0.0);
    }
}
