//! The log-log plots drawn from a [`Table`].

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::{Column, Error, Figure, Table};

const XLABEL: &str = r"$log(\epsilon)$";

/// One plot: ε against `column`, both axes logarithmic, written to
/// `file_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub column: Column,
    pub file_name: String,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub xlabel: String,
    pub ylabel: String,
    /// Matplotlib format string.
    pub fmt: String,
}

impl PlotSpec {
    /// A plot with the usual labels and blue circles joined by a line.
    pub fn new(column: Column, file_name: impl Into<String>,
               xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        let ylabel = match column {
            Column::Epsilon => XLABEL.to_string(),
            c => format!(r"$log({}(\epsilon))$", c.symbol()),
        };
        PlotSpec {
            column,
            file_name: file_name.into(),
            xlim, ylim,
            xlabel: XLABEL.to_string(),
            ylabel,
            fmt: "bo-".to_string(),
        }
    }

    /// The three plots `ces.pdf`, `ies.pdf` and `des.pdf`, in that
    /// order.  The ranges were tuned on earlier results and are kept
    /// as they are so that new plots line up with old ones.
    pub fn standard() -> [PlotSpec; 3] {
        [
            PlotSpec::new(Column::C, "ces.pdf", (9e-6, 1.1), (0.8, 1.1e4)),
            PlotSpec::new(Column::I, "ies.pdf", (5e-6, 1.), (1., 1.2e4)),
            PlotSpec::new(Column::D, "des.pdf", (5e-6, 1.2), (5e-6, 2.)),
        ]
    }

    #[must_use]
    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = label.into();
        self
    }

    #[must_use]
    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = label.into();
        self
    }

    #[must_use]
    pub fn fmt(mut self, fmt: impl Into<String>) -> Self {
        self.fmt = fmt.into();
        self
    }

    /// Both ranges must be usable on a logarithmic axis.
    pub fn validate(&self) -> Result<(), Error> {
        for (axis, (lo, hi)) in [('x', self.xlim), ('y', self.ylim)] {
            if !(lo.is_finite() && hi.is_finite() && 0. < lo && lo < hi) {
                return Err(Error::InvalidLimits {
                    file: self.file_name.clone(), axis, lo, hi });
            }
        }
        Ok(())
    }

    fn draw(&self, fig: &mut Figure, table: &Table) -> Result<(), Error> {
        let eps = table.column(Column::Epsilon);
        let y = table.column(self.column);
        let mut ax = fig.subplot()?;
        ax.grid()?;
        ax.xy(&eps, &y).fmt(&self.fmt).plot()?;
        ax.set_xscale("log")?.set_yscale("log")?;
        ax.set_xlim(self.xlim.0, self.xlim.1)?
            .set_ylim(self.ylim.0, self.ylim.1)?;
        ax.set_xlabel(&self.xlabel)?.set_ylabel(&self.ylabel)?;
        Ok(())
    }
}

/// Draw every plot of `specs` from `table` into `out_dir`, returning
/// the paths written.  Existing files are overwritten.
///
/// The table and the specs are checked before anything is drawn, so
/// a table with a non-positive ε leaves `out_dir` untouched.
pub fn render_all(
    table: &Table, specs: &[PlotSpec], out_dir: &Path,
) -> Result<Vec<PathBuf>, Error> {
    table.check_epsilon()?;
    for spec in specs {
        spec.validate()?;
    }
    let mut fig = Figure::new()?;
    let mut written = Vec::with_capacity(specs.len());
    for spec in specs {
        let clipped = table.non_positive(spec.column);
        if clipped > 0 {
            warn!(file = %spec.file_name, clipped,
                  "{:?} values <= 0 fall outside the log scale",
                  spec.column);
        }
        debug!(file = %spec.file_name, rows = table.len(), "drawing");
        fig.clf()?;
        spec.draw(&mut fig, table)?;
        let path = out_dir.join(&spec.file_name);
        fig.save().to_file(&path)?;
        info!(path = %path.display(), "wrote plot");
        written.push(path);
    }
    Ok(written)
}
