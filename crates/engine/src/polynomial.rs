//! Real polynomials in a single variable `p`.
//!
//! The profit model is at most quadratic in price, so a coefficient vector is
//! all the symbolic machinery needed: evaluation, exact differentiation, and
//! rendering for the calculation report. Differentiation multiplies each
//! coefficient by an integer power, so `d²/dp² (a·p²)` is exactly `2a`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `coeffs[i]` is the coefficient of `p^i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Build from coefficients in ascending power order.
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Coefficient of `p^power` (zero past the stored terms).
    pub fn coeff(&self, power: usize) -> f64 {
        self.coeffs.get(power).copied().unwrap_or(0.0)
    }

    /// Highest power with a nonzero coefficient. `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|&c| c != 0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.degree().is_none()
    }

    /// Evaluate at `x` (Horner).
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Exact first derivative.
    pub fn derivative(&self) -> Polynomial {
        if self.coeffs.len() <= 1 {
            return Polynomial::new(vec![0.0]);
        }
        Polynomial::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, &c)| c * power as f64)
                .collect(),
        )
    }

    /// Real roots of a polynomial of degree at most one.
    ///
    /// Returns `None` when the polynomial is identically zero (every point is a root),
    /// `Some(vec![])` for a nonzero constant and `Some(vec![root])` for a line.
    /// Higher degrees are outside what the profit model produces and yield `Some(vec![])`.
    pub fn linear_roots(&self) -> Option<Vec<f64>> {
        match self.degree() {
            None => None,
            Some(0) => Some(Vec::new()),
            Some(1) => Some(vec![-self.coeff(0) / self.coeff(1)]),
            Some(_) => Some(Vec::new()),
        }
    }

    /// Render in LaTeX, e.g. `-2.50 p^{2} + 712.50 p - 29000.00`.
    pub fn to_latex(&self) -> String {
        self.render(|power| match power {
            0 => String::new(),
            1 => " p".to_string(),
            n => format!(" p^{{{n}}}"),
        })
    }

    fn render<F>(&self, var: F) -> String
    where
        F: Fn(usize) -> String,
    {
        let mut out = String::new();
        for (power, &c) in self.coeffs.iter().enumerate().rev() {
            if c == 0.0 {
                continue;
            }
            let magnitude = format!("{:.2}{}", c.abs(), var(power));
            if out.is_empty() {
                if c < 0.0 {
                    out.push('-');
                }
                out.push_str(&magnitude);
            } else {
                out.push_str(if c < 0.0 { " - " } else { " + " });
                out.push_str(&magnitude);
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

impl fmt::Display for Polynomial {
    /// Plain text, e.g. `-2.50*p^2 + 712.50*p - 29000.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.render(|power| match power {
            0 => String::new(),
            1 => "*p".to_string(),
            n => format!("*p^{n}"),
        });
        f.write_str(&text)
    }
}
