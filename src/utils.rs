//! utils — PyO3 glue shared by the Python-facing classes in `lib.rs`.
//!
//! Purpose
//! -------
//! Convert Python inputs into the crate's ndarray types and adapt Python
//! callables to the [`Objective`](crate::evaluation::Objective) contract.
//!
//! Key behaviors
//! -------------
//! - [`extract_f64_array`] accepts a 1-D `numpy.ndarray`, anything with a
//!   `to_numpy()` method (e.g. a `pandas.Series`), or a plain sequence of
//!   floats.
//! - [`extract_pos`] builds an owned [`Pos`] and rejects NaN entries.
//! - [`PyObjective`] calls a Python function with a NumPy copy of the
//!   coordinates and maps any raised exception, or a non-float return value,
//!   into [`ObjectiveError::Failed`]; a NaN result is
//!   [`ObjectiveError::NonFinite`].
//!
//! Conventions
//! -----------
//! - Everything here is compiled only with the `python-bindings` feature.
//! - Python exceptions raised by the objective are stringified; their type is
//!   not preserved across the Rust boundary.

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1, ToPyArray};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::evaluation::{Objective, ObjectiveError, ObjectiveResult, Pos};

/// Borrow a contiguous `f64` view of `raw_data`, copying only when the input
/// is not already a contiguous float64 array.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Owned coordinate vector from any input accepted by [`extract_f64_array`].
///
/// # Errors
/// `ValueError` if the input is empty or contains NaN; `TypeError` if it is
/// not array-like.
#[cfg(feature = "python-bindings")]
pub fn extract_pos<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Pos> {
    let arr = extract_f64_array(py, raw_data)?;
    let pos = arr.as_array().to_owned();
    if pos.is_empty() {
        return Err(PyValueError::new_err(format!("{name} must not be empty")));
    }
    if pos.iter().any(|v| v.is_nan()) {
        return Err(PyValueError::new_err(format!("{name} must not contain NaN values")));
    }
    Ok(pos)
}

/// [`Objective`] backed by a Python callable `f(x: numpy.ndarray) -> float`.
#[cfg(feature = "python-bindings")]
pub struct PyObjective<'py> {
    func: Bound<'py, PyAny>,
}

#[cfg(feature = "python-bindings")]
impl<'py> PyObjective<'py> {
    /// # Errors
    /// `TypeError` if `func` is not callable.
    pub fn new(func: Bound<'py, PyAny>) -> PyResult<Self> {
        if !func.is_callable() {
            return Err(pyo3::exceptions::PyTypeError::new_err("objective must be callable"));
        }
        Ok(Self { func })
    }
}

#[cfg(feature = "python-bindings")]
impl Objective for PyObjective<'_> {
    fn objective(&self, v: &Pos) -> ObjectiveResult<f64> {
        let arg = v.to_pyarray(self.func.py());
        let value = self
            .func
            .call1((arg,))
            .and_then(|out| out.extract::<f64>())
            .map_err(|err| ObjectiveError::failed(err.to_string()))?;
        if value.is_nan() {
            return Err(ObjectiveError::NonFinite { value });
        }
        Ok(value)
    }
}
