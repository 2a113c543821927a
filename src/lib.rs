//! Log-log plots of resolution tables, the ε, C(ε), D(ε), I(ε)
//! series produced by a multi-resolution connectivity analysis, drawn
//! with [Matplotlib][].
//!
//! Usage
//! -----
//!
//! A [`Table`] is loaded from a whitespace-delimited file and handed
//! to [`render_all`] together with the plots to draw.
//! [`PlotSpec::standard`] holds the three usual plots (`ces.pdf`,
//! `ies.pdf`, `des.pdf`).
//!
//! ```no_run
//! use std::path::Path;
//! use epsplot::{render_all, PlotSpec, Table};
//!
//! let table = Table::from_path("results.dat")?;
//! render_all(&table, &PlotSpec::standard(), Path::new("."))?;
//! # Ok::<(), epsplot::Error>(())
//! ```
//!
//! Drawing goes through a small binding to Matplotlib's explicit
//! interface ([`Figure`], [`Axes`]) which keeps a Rust flavor.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::{
    fmt::{Display, Formatter},
    io,
    path::{Path, PathBuf},
};
use lazy_static::lazy_static;
use ndarray::{ArrayBase, Ix1};
use numpy::{PyArray1, ToPyArray};
use pyo3::{
    prelude::*,
    intern,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyDict,
};

pub mod plots;
pub mod table;

pub use plots::{render_all, PlotSpec};
pub use table::{Coefficients, Column, Table};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Call the method `$m` of the Python object `$obj` with the
/// positional arguments `$args`, discarding its return value.
macro_rules! meth {
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.bind(py)
                .call_method1(intern!(py, stringify!($m)), $args)
                .map(|_| ())
                .map_err(Error::Python)
        })
    };
}

/// Possible errors of loading and plotting.
#[derive(Debug)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    FileNotFound(PathBuf),
    /// Permission denied to access or create the filesystem path.
    PermissionDenied(PathBuf),
    /// Other Python errors.
    Python(PyErr),
    /// The input table could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A field of the table is not a number.  `line` and `column`
    /// are 1-based.
    Parse { line: usize, column: usize, token: String },
    /// A row does not have as many fields as the first row.
    RaggedRow { line: usize, expected: usize, found: usize },
    /// The table has no data rows.
    EmptyTable,
    /// The table has fewer columns than ε, C, D, I.
    TooFewColumns { found: usize },
    /// An ε value cannot be placed on a logarithmic axis.
    NonPositiveEpsilon { line: usize, value: f64 },
    /// Axis limits of a plot are not a positive increasing range.
    InvalidLimits { file: String, axis: char, lo: f64, hi: f64 },
    /// The x and y data of a series differ in length.
    LengthMismatch { x: usize, y: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::NoMatplotlib =>
                write!(f, "The matplotlib library has not been found.\n\
Please install it.  See https://matplotlib.org/\n\
If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554"),
            Error::FileNotFound(p) =>
                write!(f, "{}: a path element is not a directory or does \
                           not exist", p.display()),
            Error::PermissionDenied(p) =>
                write!(f, "{}: permission denied", p.display()),
            Error::Python(e) =>
                write!(f, "Python error: {}", e),
            Error::Io { path, source } =>
                write!(f, "cannot read {}: {}", path.display(), source),
            Error::Parse { line, column, token } =>
                write!(f, "line {}, column {}: {:?} is not a number",
                       line, column, token),
            Error::RaggedRow { line, expected, found } =>
                write!(f, "line {}: expected {} columns, found {}",
                       line, expected, found),
            Error::EmptyTable =>
                write!(f, "the table has no data rows"),
            Error::TooFewColumns { found } =>
                write!(f, "expected at least 4 columns (ε, C, D, I), \
                           found {}", found),
            Error::NonPositiveEpsilon { line, value } =>
                write!(f, "line {}: ε = {} cannot be shown on a \
                           logarithmic axis", line, value),
            Error::InvalidLimits { file, axis, lo, hi } =>
                write!(f, "{}: {}-limits [{}, {}] are not a positive \
                           increasing range", file, axis, lo, hi),
            Error::LengthMismatch { x, y } =>
                write!(f, "x has {} values but y has {}", x, y),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Python(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PyErr> for Error {
    fn from(e: PyErr) -> Self { Error::Python(e) }
}

lazy_static! {
    // Only the explicit `Figure` API is used: no pyplot global state
    // and no GUI backend has to be selected.
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        Python::with_gil(|py| {
            PyModule::import_bound(py, intern!(py, "matplotlib.figure"))
                .map(|m| m.unbind())
        })
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}


/// Trait expressing that `Self` is a series of `f64` that can be
/// handed to numpy.
pub trait Data {
    fn len(&self) -> usize;
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>>;
}

impl Data for [f64] {
    fn len(&self) -> usize { <[f64]>::len(self) }

    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }
}

impl<const N: usize> Data for [f64; N] {
    fn len(&self) -> usize { N }

    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self[..].to_numpy(py)
    }
}

impl Data for Vec<f64> {
    fn len(&self) -> usize { Vec::len(self) }

    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self[..].to_numpy(py)
    }
}

impl<S> Data for ArrayBase<S, Ix1>
where S: ndarray::Data<Elem = f64> {
    fn len(&self) -> usize { ArrayBase::len(self) }

    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.to_pyarray_bound(py)
    }
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

#[derive(Debug)]
pub struct Axes {
    ax: PyObject,
}

impl Figure {
    /// Return a new `Figure`.
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn new() -> Result<Figure, Error> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| {
            let fig = figure.bind(py)
                .getattr(intern!(py, "Figure"))?
                .call0()?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Clear the figure, removing all its axes.
    pub fn clf(&mut self) -> Result<(), Error> {
        meth!(self.fig, clf, ())
    }

    /// Number of axes currently on the figure.
    pub fn n_axes(&self) -> Result<usize, Error> {
        Python::with_gil(|py| {
            let axes = self.fig.bind(py).getattr(intern!(py, "axes"))?;
            Ok(axes.len()?)
        })
    }

    /// Add a single set of axes covering the figure.
    pub fn subplot(&mut self) -> Result<Axes, Error> {
        Python::with_gil(|py| {
            let ax = self.fig.bind(py)
                .call_method0(intern!(py, "subplots"))?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    pub fn save(&self) -> Savefig<'_> {
        Savefig { fig: self, dpi: None }
    }
}

pub struct Savefig<'a> {
    fig: &'a Figure,
    dpi: Option<f64>,
}

impl<'a> Savefig<'a> {
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Write the figure to `path`.  The format is deduced from the
    /// extension; an existing file is overwritten.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?;
            }
            self.fig.fig.bind(py)
                .call_method(intern!(py, "savefig"), (path,), Some(&kwargs))
                .map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        Error::FileNotFound(path.to_path_buf())
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        Error::PermissionDenied(path.to_path_buf())
                    } else {
                        Error::Python(e)
                    }
                })?;
            Ok(())
        })
    }
}


impl Axes {
    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use epsplot::Figure;
    /// let mut fig = Figure::new()?;
    /// let mut ax = fig.subplot()?;
    /// ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt("bo-").plot()?;
    /// fig.save().to_file("target/XY_plot.pdf")?;
    /// # Ok::<(), epsplot::Error>(())
    /// ```
    #[must_use]
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        // We mutably borrow `self` to reflect that the final `.plot()`
        // will mutate the underlying Python object.
        XY { axes: self,
             options: PlotOptions::new(),
             x, y }
    }

    /// Set the xaxis' scale.  Possible values for `v` are "linear",
    /// "log", "symlog", "logit",...
    pub fn set_xscale(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xscale, (v,))?;
        Ok(self)
    }

    /// Set the yaxis' scale.  See [`Axes::set_xscale`].
    pub fn set_yscale(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_yscale, (v,))?;
        Ok(self)
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlim, (lo, hi))?;
        Ok(self)
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylim, (lo, hi))?;
        Ok(self)
    }

    pub fn grid(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, grid, (true,))?;
        Ok(self)
    }

    /// Labels may use Matplotlib's mathtext, e.g. `r"$log(\epsilon)$"`.
    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }
}

#[derive(Clone)]
struct PlotOptions<'a> {
    fmt: &'a str,
    label: &'a str,
    linewidth: Option<f64>,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions { fmt: "", label: "", linewidth: None }
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if !self.label.is_empty() {
            kwargs.set_item("label", self.label)?;
        }
        if let Some(w) = self.linewidth {
            kwargs.set_item("linewidth", w)?;
        }
        Ok(kwargs)
    }
}

pub struct XY<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    x: &'a D,
    y: &'a D,
}

impl<'a, D> XY<'a, D>
where D: Data + ?Sized {
    /// Matplotlib format string, e.g. `"bo-"` for blue circles
    /// joined by a solid line.
    #[must_use]
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.options.fmt = fmt;
        self
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }

    /// Plot the data with the options specified in [`XY`].
    pub fn plot(self) -> Result<(), Error> {
        if self.x.len() != self.y.len() {
            return Err(Error::LengthMismatch { x: self.x.len(),
                                               y: self.y.len() });
        }
        Python::with_gil(|py| {
            let xn = self.x.to_numpy(py);
            let yn = self.y.to_numpy(py);
            let kwargs = self.options.kwargs(py)?;
            self.axes.ax.bind(py).call_method(
                intern!(py, "plot"), (xn, yn, self.options.fmt),
                Some(&kwargs))?;
            Ok(())
        })
    }
}
