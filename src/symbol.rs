/// A finished barcode as a grid of modules, independent of any output format.
///
/// Linear (1D) symbols are a single row; each module is drawn as a full-height
/// bar by the renderer. Matrix symbols are drawn as square modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    width: usize,
    height: usize,
    modules: Vec<bool>,
    linear: bool,
}

impl Symbol {
    /// Build a linear symbol from one flag per module, `true` meaning a dark bar.
    pub fn linear(modules: Vec<bool>) -> Self {
        Symbol {
            width: modules.len(),
            height: 1,
            modules,
            linear: true,
        }
    }

    /// Build a linear symbol from an encoder's `0`/`1` module bytes.
    pub fn from_bars(bars: &[u8]) -> Self {
        Symbol::linear(bars.iter().map(|&b| b != 0).collect())
    }

    pub fn matrix_from_fn(
        width: usize,
        height: usize,
        mut is_dark: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let mut modules = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                modules.push(is_dark(x, y));
            }
        }
        Symbol {
            width,
            height,
            modules,
            linear: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_linear(&self) -> bool {
        self.linear
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.modules[y * self.width + x]
    }

    /// Runs of consecutive dark modules in row `y`, as `(start, length)`.
    pub fn dark_runs(&self, y: usize) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start: Option<usize> = None;
        for x in 0..self.width {
            match (self.is_dark(x, y), start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, x - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.width - s));
        }
        runs
    }
}
