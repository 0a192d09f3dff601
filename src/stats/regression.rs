//! Regression fitting for regression plots.
//!
//! [`RegressionRoutine`] is the seam between chart composition and curve
//! fitting. [`DefaultRegression`] implements polynomial least squares,
//! log-x, logistic, robust (Huber) and lowess fits with bootstrap
//! confidence bands.

use lowess::prelude::{Batch, Lowess};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::grammar::Estimator;

use super::summary::{self, bootstrap, ci, extent, percentile, resample, std_dev};

/// Points in the evaluation grid of a fitted curve.
pub const GRID_POINTS: usize = 100;

const HUBER_T: f64 = 1.345;
const MAD_NORMALIZER: f64 = 0.674_489_750_196_081_7;
const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-8;
/// Singular values below this fraction of the largest are treated as zero.
const RCOND: f64 = 1e-12;
const MAX_SVD_ITERATIONS: usize = 1000;
/// Fraction of points in each lowess neighborhood.
const LOWESS_FRAC: f64 = 2.0 / 3.0;

/// Confidence interval drawn around binned estimates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum XCi {
    /// Use the regression confidence level.
    #[default]
    Ci,
    /// Bootstrap interval at this level.
    Level(f64),
    /// Plus or minus one standard deviation.
    Sd,
    /// No interval.
    None,
}

/// Fitting options.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionOptions {
    /// Polynomial order.
    pub order: usize,
    /// Logistic regression for binary `y`.
    pub logistic: bool,
    /// Lowess smoother (no confidence band).
    pub lowess: bool,
    /// Huber-weighted robust regression.
    pub robust: bool,
    /// Linear in `ln x`.
    pub logx: bool,
    /// Confidence level of the band, in percent.
    pub ci: Option<f64>,
    /// Bootstrap resamples.
    pub n_boot: usize,
    /// Seed for resampling.
    pub seed: u64,
    /// Limit the grid to the observed x range.
    pub truncate: bool,
    /// Collapse each distinct x to a point estimate.
    pub x_estimator: Option<Estimator>,
    /// Snap x to this many percentile bin centers before estimating.
    pub x_bins: Option<usize>,
    /// Interval around the point estimates.
    pub x_ci: XCi,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            order: 1,
            logistic: false,
            lowess: false,
            robust: false,
            logx: false,
            ci: Some(95.0),
            n_boot: 1000,
            seed: 0,
            truncate: false,
            x_estimator: None,
            x_bins: None,
            x_ci: XCi::Ci,
        }
    }
}

impl RegressionOptions {
    /// Checks that at most one model family is selected.
    pub fn validate(&self) -> Result<()> {
        let selected: Vec<&'static str> = [
            (self.order > 1, "order"),
            (self.logistic, "logistic"),
            (self.lowess, "lowess"),
            (self.robust, "robust"),
            (self.logx, "logx"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        match selected.as_slice() {
            [first, second, ..] => Err(Error::ConflictingParameters {
                first: *first,
                second: *second,
            }),
            _ => Ok(()),
        }
    }

    /// Level of the interval around binned estimates.
    #[must_use]
    pub fn x_ci_level(&self) -> Option<f64> {
        match self.x_ci {
            XCi::Ci => self.ci,
            XCi::Level(level) => Some(level),
            XCi::Sd | XCi::None => None,
        }
    }
}

/// A fitted curve.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionFit {
    /// Evaluation grid.
    pub grid: Vec<f64>,
    /// Predictions on the grid.
    pub yhat: Vec<f64>,
    /// Lower and upper confidence band on the grid.
    pub bands: Option<(Vec<f64>, Vec<f64>)>,
}

/// Point estimates per distinct (possibly binned) x.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedEstimate {
    /// Distinct x values, ascending.
    pub x: Vec<f64>,
    /// Estimate per x.
    pub y: Vec<f64>,
    /// Interval per x.
    pub ci: Vec<Option<(f64, f64)>>,
}

/// A curve-fitting backend.
pub trait RegressionRoutine {
    /// Fit `y` on `x` and evaluate over `x_range` (or the data range).
    ///
    /// # Errors
    ///
    /// Fails on empty or mismatched input, conflicting options, or a fit
    /// that does not converge.
    fn fit_regression(
        &self,
        opts: &RegressionOptions,
        x: &[f64],
        y: &[f64],
        x_range: Option<(f64, f64)>,
    ) -> Result<RegressionFit>;

    /// Point estimates of `y` per distinct x, with intervals.
    ///
    /// # Errors
    ///
    /// Fails on empty or mismatched input, or when no estimator is set.
    fn estimate_data(&self, opts: &RegressionOptions, x: &[f64], y: &[f64]) -> Result<BinnedEstimate> {
        check_input(x, y)?;
        let estimator = opts.x_estimator.ok_or(Error::MissingParameter("x_estimator"))?;
        let x = match opts.x_bins {
            Some(bins) => bin_predictor(x, bins),
            None => x.to_vec(),
        };

        let mut levels: Vec<f64> = x.iter().copied().filter(|v| !v.is_nan()).collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();

        let mut rng = StdRng::seed_from_u64(opts.seed);
        let mut points = Vec::with_capacity(levels.len());
        let mut cis = Vec::with_capacity(levels.len());
        for &level in &levels {
            let group: Vec<f64> =
                x.iter().zip(y).filter(|(xv, _)| **xv == level).map(|(_, yv)| *yv).collect();
            let est = estimator.apply(&group);
            points.push(est);
            cis.push(match (opts.x_ci, opts.x_ci_level()) {
                (XCi::Sd, _) => {
                    let sd = std_dev(&group);
                    Some((est - sd, est + sd))
                }
                (_, Some(ci_level)) => {
                    let boots = bootstrap(&group, opts.n_boot, &mut rng, |s| estimator.apply(s));
                    Some(ci(&boots, ci_level))
                }
                (_, None) => None,
            });
        }

        Ok(BinnedEstimate {
            x: levels,
            y: points,
            ci: cis,
        })
    }
}

/// The built-in fitting routine.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRegression;

impl RegressionRoutine for DefaultRegression {
    fn fit_regression(
        &self,
        opts: &RegressionOptions,
        x: &[f64],
        y: &[f64],
        x_range: Option<(f64, f64)>,
    ) -> Result<RegressionFit> {
        check_input(x, y)?;
        opts.validate()?;

        if opts.lowess {
            log::debug!("fitting lowess over {} points", x.len());
            let (grid, yhat) = smooth(x, y)?;
            return Ok(RegressionFit {
                grid,
                yhat,
                bands: None,
            });
        }

        let data_range =
            extent(x).ok_or_else(|| Error::Regression("no finite x values".to_string()))?;
        let (lo, hi) = match x_range {
            Some(range) if !opts.truncate => range,
            _ => data_range,
        };
        let model = Model::from_options(opts);
        let mut grid = linspace(lo, hi, GRID_POINTS);
        if model == Model::LogX {
            grid.retain(|g| *g > 0.0);
        }
        log::debug!("fitting {model:?} over {} points", x.len());

        let yhat = model.fit_predict(x, y, &grid)?;
        let bands = match opts.ci {
            Some(level) if opts.n_boot > 0 => bootstrap_bands(model, opts, x, y, &grid, level),
            _ => None,
        };

        Ok(RegressionFit { grid, yhat, bands })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Model {
    Polynomial(usize),
    LogX,
    Logistic,
    Robust,
}

impl Model {
    fn from_options(opts: &RegressionOptions) -> Self {
        if opts.logx {
            Model::LogX
        } else if opts.logistic {
            Model::Logistic
        } else if opts.robust {
            Model::Robust
        } else {
            Model::Polynomial(opts.order.max(1))
        }
    }

    fn fit_predict(self, x: &[f64], y: &[f64], grid: &[f64]) -> Result<Vec<f64>> {
        match self {
            Model::Polynomial(order) => {
                let basis = PolyBasis::new(x, order);
                let beta = weighted_least_squares(&basis.design(x), y, None)?;
                Ok(basis.predict(&beta, grid))
            }
            Model::LogX => {
                if x.iter().any(|v| *v <= 0.0) {
                    return Err(Error::Regression("logx requires positive x values".to_string()));
                }
                let lx: Vec<f64> = x.iter().map(|v| v.ln()).collect();
                let basis = PolyBasis::new(&lx, 1);
                let beta = weighted_least_squares(&basis.design(&lx), y, None)?;
                let lgrid: Vec<f64> = grid.iter().map(|g| g.ln()).collect();
                Ok(basis.predict(&beta, &lgrid))
            }
            Model::Logistic => {
                let basis = PolyBasis::new(x, 1);
                let beta = logistic_irls(&basis.design(x), y)?;
                Ok(basis.predict(&beta, grid).into_iter().map(sigmoid).collect())
            }
            Model::Robust => {
                let basis = PolyBasis::new(x, 1);
                let beta = huber_irls(&basis.design(x), y)?;
                Ok(basis.predict(&beta, grid))
            }
        }
    }
}

fn check_input(x: &[f64], y: &[f64]) -> Result<()> {
    if x.is_empty() {
        return Err(Error::EmptyData);
    }
    if x.len() != y.len() {
        return Err(Error::DataLengthMismatch {
            column: "y".to_string(),
            len: y.len(),
            expected: x.len(),
        });
    }
    Ok(())
}

/// `n` evenly spaced values from `lo` to `hi` inclusive.
#[must_use]
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
                .collect()
        }
    }
}

/// Snap each x to the nearest of `bins` centers at evenly spaced percentiles.
#[must_use]
pub fn bin_predictor(x: &[f64], bins: usize) -> Vec<f64> {
    if bins == 0 {
        return x.to_vec();
    }
    let centers: Vec<f64> = (1..=bins)
        .map(|i| percentile(x, 100.0 * i as f64 / (bins + 1) as f64))
        .collect();
    x.iter()
        .map(|&v| {
            centers
                .iter()
                .copied()
                .min_by(|a, b| (a - v).abs().total_cmp(&(b - v).abs()))
                .unwrap_or(v)
        })
        .collect()
}

fn sigmoid(eta: f64) -> f64 {
    1.0 / (1.0 + (-eta).exp())
}

/// Polynomial basis over standardized x.
struct PolyBasis {
    order: usize,
    center: f64,
    scale: f64,
}

impl PolyBasis {
    fn new(x: &[f64], order: usize) -> Self {
        let center = summary::mean(x);
        let sd = std_dev(x);
        let scale = if sd > 0.0 { sd } else { 1.0 };
        Self { order, center, scale }
    }

    fn design(&self, x: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(x.len(), self.order + 1, |i, p| {
            ((x[i] - self.center) / self.scale).powi(p as i32)
        })
    }

    fn predict(&self, beta: &DVector<f64>, grid: &[f64]) -> Vec<f64> {
        (self.design(grid) * beta).iter().copied().collect()
    }
}

/// Least squares of `y` on `design` with optional row weights.
///
/// Solved through the SVD pseudo-inverse, so a rank-deficient design yields
/// the minimum-norm coefficients.
fn weighted_least_squares(
    design: &DMatrix<f64>,
    y: &[f64],
    weights: Option<&[f64]>,
) -> Result<DVector<f64>> {
    let mut a = design.clone();
    let mut b = DVector::from_column_slice(y);
    if let Some(weights) = weights {
        for (i, w) in weights.iter().enumerate() {
            let root = w.sqrt();
            a.row_mut(i).scale_mut(root);
            b[i] *= root;
        }
    }
    let svd = a
        .try_svd(true, true, f64::EPSILON, MAX_SVD_ITERATIONS)
        .ok_or_else(|| Error::Regression("SVD did not converge".to_string()))?;
    let cutoff = RCOND * svd.singular_values.max();
    svd.solve(&b, cutoff).map_err(|e| Error::Regression(e.to_string()))
}

fn converged(old: &DVector<f64>, new: &DVector<f64>) -> bool {
    old.iter().zip(new.iter()).all(|(a, b)| (a - b).abs() <= TOLERANCE * (1.0 + a.abs()))
}

/// Binomial GLM with logit link by iteratively reweighted least squares.
fn logistic_irls(design: &DMatrix<f64>, y: &[f64]) -> Result<DVector<f64>> {
    let mut beta = DVector::zeros(design.ncols());
    for _ in 0..MAX_ITERATIONS {
        let eta = design * &beta;
        let (weights, working): (Vec<f64>, Vec<f64>) = eta
            .iter()
            .zip(y)
            .map(|(&eta, &yi)| {
                let mu = sigmoid(eta);
                let w = (mu * (1.0 - mu)).max(1e-10);
                (w, eta + (yi - mu) / w)
            })
            .unzip();
        let next = weighted_least_squares(design, &working, Some(&weights))?;
        let done = converged(&beta, &next);
        beta = next;
        if done {
            break;
        }
    }
    Ok(beta)
}

/// Huber M-estimation with MAD scale.
fn huber_irls(design: &DMatrix<f64>, y: &[f64]) -> Result<DVector<f64>> {
    let observed = DVector::from_column_slice(y);
    let mut beta = weighted_least_squares(design, y, None)?;
    for _ in 0..MAX_ITERATIONS {
        let residuals = &observed - design * &beta;
        let abs: Vec<f64> = residuals.iter().map(|r| r.abs()).collect();
        let scale = summary::median(&abs) / MAD_NORMALIZER;
        if scale <= f64::EPSILON {
            break;
        }
        let weights: Vec<f64> = residuals
            .iter()
            .map(|r| {
                let u = (r / scale).abs();
                if u <= HUBER_T {
                    1.0
                } else {
                    HUBER_T / u
                }
            })
            .collect();
        let next = weighted_least_squares(design, y, Some(&weights))?;
        let done = converged(&beta, &next);
        beta = next;
        if done {
            break;
        }
    }
    Ok(beta)
}

/// Lowess smoothing; returns x ascending with the smoothed y at each.
fn smooth(x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
    let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
    let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();
    if xs.len() < 3 {
        return Ok((xs, ys));
    }

    let model = Lowess::new()
        .fraction(LOWESS_FRAC)
        .iterations(3)
        .adapter(Batch)
        .build()
        .map_err(|e| Error::Regression(e.to_string()))?;
    let result = model.fit(&xs, &ys).map_err(|e| Error::Regression(e.to_string()))?;
    Ok((xs, result.y))
}

/// Pointwise percentile bands over bootstrap refits.
fn bootstrap_bands(
    model: Model,
    opts: &RegressionOptions,
    x: &[f64],
    y: &[f64],
    grid: &[f64],
    level: f64,
) -> Option<(Vec<f64>, Vec<f64>)> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(opts.n_boot); grid.len()];
    let mut bx = vec![0.0; x.len()];
    let mut by = vec![0.0; y.len()];
    for _ in 0..opts.n_boot {
        for (slot, idx) in resample(x.len(), &mut rng).into_iter().enumerate() {
            bx[slot] = x[idx];
            by[slot] = y[idx];
        }
        // Resamples whose fit fails are skipped.
        if let Ok(yhat) = model.fit_predict(&bx, &by, grid) {
            for (col, v) in columns.iter_mut().zip(yhat) {
                col.push(v);
            }
        }
    }
    if columns.first().map_or(true, Vec::is_empty) {
        log::warn!("no bootstrap resample produced a fit; omitting confidence band");
        return None;
    }
    Some(columns.iter().map(|col| ci(col, level)).unzip())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn no_ci() -> RegressionOptions {
        RegressionOptions {
            ci: None,
            ..RegressionOptions::default()
        }
    }

    #[test]
    fn test_linear_fit_exact() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();
        let fit = DefaultRegression.fit_regression(&no_ci(), &x, &y, None).unwrap();
        assert_eq!(fit.grid.len(), GRID_POINTS);
        assert_relative_eq!(fit.grid[0], 0.0);
        assert_relative_eq!(fit.grid[GRID_POINTS - 1], 4.0);
        for (g, yh) in fit.grid.iter().zip(&fit.yhat) {
            assert_relative_eq!(*yh, 3.0 * g - 2.0, epsilon = 1e-9);
        }
        assert!(fit.bands.is_none());
    }

    #[test]
    fn test_quadratic_fit_exact() {
        let x: Vec<f64> = (-5..=5).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v - v + 1.0).collect();
        let opts = RegressionOptions {
            order: 2,
            ..no_ci()
        };
        let fit = DefaultRegression.fit_regression(&opts, &x, &y, Some((-6.0, 6.0))).unwrap();
        assert_relative_eq!(fit.grid[0], -6.0);
        for (g, yh) in fit.grid.iter().zip(&fit.yhat) {
            assert_relative_eq!(*yh, g * g - g + 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_truncate_uses_data_range() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        let opts = RegressionOptions {
            truncate: true,
            ..no_ci()
        };
        let fit = DefaultRegression.fit_regression(&opts, &x, &y, Some((0.0, 10.0))).unwrap();
        assert_relative_eq!(fit.grid[0], 1.0);
        assert_relative_eq!(*fit.grid.last().unwrap(), 3.0);
    }

    #[test]
    fn test_bands_contain_fit() {
        let x: Vec<f64> = (0..30).map(f64::from).collect();
        let y: Vec<f64> = x.iter().enumerate().map(|(i, v)| v + if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let opts = RegressionOptions {
            n_boot: 200,
            ..RegressionOptions::default()
        };
        let fit = DefaultRegression.fit_regression(&opts, &x, &y, None).unwrap();
        let (lo, hi) = fit.bands.clone().unwrap();
        assert_eq!(lo.len(), fit.grid.len());
        let mid = GRID_POINTS / 2;
        assert!(lo[mid] <= fit.yhat[mid] && fit.yhat[mid] <= hi[mid]);
        let again = DefaultRegression.fit_regression(&opts, &x, &y, None).unwrap();
        assert_eq!(fit, again);
    }

    #[test]
    fn test_rank_deficient_design_is_flat() {
        let fit = DefaultRegression
            .fit_regression(&no_ci(), &[2.0, 2.0], &[1.0, 3.0], None)
            .unwrap();
        assert!(fit.grid.iter().all(|g| *g == 2.0));
        for yh in &fit.yhat {
            assert_relative_eq!(*yh, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fit_far_from_origin() {
        let x: Vec<f64> = (0..10).map(|i| 1.7e9 + f64::from(i)).collect();
        let y: Vec<f64> = x.iter().map(|v| 0.5 * (v - 1.7e9) + 3.0).collect();
        let fit = DefaultRegression.fit_regression(&no_ci(), &x, &y, None).unwrap();
        assert_relative_eq!(fit.grid[0], 1.7e9);
        assert_relative_eq!(fit.yhat[0], 3.0, epsilon = 1e-6);
        assert_relative_eq!(*fit.yhat.last().unwrap(), 7.5, epsilon = 1e-6);
    }

    #[test]
    fn test_logx() {
        let x = [1.0, 2.0, 4.0, 8.0];
        let y: Vec<f64> = x.iter().map(|v: &f64| 2.0 * v.ln() + 1.0).collect();
        let opts = RegressionOptions {
            logx: true,
            ..no_ci()
        };
        let fit = DefaultRegression.fit_regression(&opts, &x, &y, Some((-1.0, 8.0))).unwrap();
        assert!(fit.grid.iter().all(|g| *g > 0.0));
        for (g, yh) in fit.grid.iter().zip(&fit.yhat) {
            assert_relative_eq!(*yh, 2.0 * g.ln() + 1.0, epsilon = 1e-8);
        }
        let bad = DefaultRegression.fit_regression(&opts, &[0.0, 1.0], &[1.0, 2.0], None);
        assert!(matches!(bad, Err(Error::Regression(_))));
    }

    #[test]
    fn test_logistic_is_monotone_probability() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|v| if *v >= 10.0 { 1.0 } else { 0.0 })
            .enumerate()
            .map(|(i, v)| if i == 8 { 1.0 } else if i == 12 { 0.0 } else { v })
            .collect();
        let opts = RegressionOptions {
            logistic: true,
            ..no_ci()
        };
        let fit = DefaultRegression.fit_regression(&opts, &x, &y, None).unwrap();
        assert!(fit.yhat.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(fit.yhat.windows(2).all(|w| w[0] <= w[1]));
        assert!(fit.yhat[0] < 0.5 && *fit.yhat.last().unwrap() > 0.5);
    }

    #[test]
    fn test_robust_ignores_outlier() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let mut y: Vec<f64> = x.iter().map(|v| 0.5 * v).collect();
        y[19] = 100.0;
        let opts = RegressionOptions {
            robust: true,
            ..no_ci()
        };
        let fit = DefaultRegression.fit_regression(&opts, &x, &y, Some((0.0, 19.0))).unwrap();
        assert!((fit.yhat[0] - 0.0).abs() < 0.5);
        assert!((fit.yhat[GRID_POINTS - 1] - 9.5).abs() < 1.5);
    }

    #[test]
    fn test_lowess_has_no_bands() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let opts = RegressionOptions {
            lowess: true,
            ..RegressionOptions::default()
        };
        let fit = DefaultRegression.fit_regression(&opts, &x, &x, None).unwrap();
        assert!(fit.bands.is_none());
        assert_eq!(fit.grid.len(), 10);
        for (g, yh) in fit.grid.iter().zip(&fit.yhat) {
            assert_relative_eq!(*yh, *g, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_lowess_sorts_input() {
        let opts = RegressionOptions {
            lowess: true,
            ..no_ci()
        };
        let x = [4.0, 1.0, 3.0, 0.0, 2.0];
        let y = [4.0, 1.0, 3.0, 0.0, 2.0];
        let fit = DefaultRegression.fit_regression(&opts, &x, &y, None).unwrap();
        assert_eq!(fit.grid, vec![0.0, 1.0, 2.0, 3.0, 4.0]);

        let pair = DefaultRegression.fit_regression(&opts, &[2.0, 1.0], &[5.0, 6.0], None).unwrap();
        assert_eq!(pair.grid, vec![1.0, 2.0]);
        assert_eq!(pair.yhat, vec![6.0, 5.0]);
    }

    #[test]
    fn test_conflicting_models() {
        let opts = RegressionOptions {
            robust: true,
            logx: true,
            ..no_ci()
        };
        assert!(matches!(
            DefaultRegression.fit_regression(&opts, &[1.0, 2.0], &[1.0, 2.0], None),
            Err(Error::ConflictingParameters { first: "robust", second: "logx" })
        ));
    }

    #[test]
    fn test_input_validation() {
        assert!(matches!(
            DefaultRegression.fit_regression(&no_ci(), &[], &[], None),
            Err(Error::EmptyData)
        ));
        assert!(matches!(
            DefaultRegression.fit_regression(&no_ci(), &[1.0], &[1.0, 2.0], None),
            Err(Error::DataLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_estimate_data_groups_x() {
        let x = [1.0, 1.0, 2.0, 2.0, 2.0];
        let y = [1.0, 3.0, 4.0, 5.0, 6.0];
        let opts = RegressionOptions {
            x_estimator: Some(Estimator::Mean),
            x_ci: XCi::Sd,
            ..RegressionOptions::default()
        };
        let est = DefaultRegression.estimate_data(&opts, &x, &y).unwrap();
        assert_eq!(est.x, vec![1.0, 2.0]);
        assert_relative_eq!(est.y[0], 2.0);
        assert_relative_eq!(est.y[1], 5.0);
        let (lo, hi) = est.ci[0].unwrap();
        assert_relative_eq!(lo, 1.0);
        assert_relative_eq!(hi, 3.0);
    }

    #[test]
    fn test_estimate_data_ci_none() {
        let opts = RegressionOptions {
            x_estimator: Some(Estimator::Median),
            x_ci: XCi::None,
            ..RegressionOptions::default()
        };
        let est = DefaultRegression.estimate_data(&opts, &[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert!(est.ci.iter().all(Option::is_none));

        let no_est = RegressionOptions::default();
        assert!(matches!(
            DefaultRegression.estimate_data(&no_est, &[1.0], &[1.0]),
            Err(Error::MissingParameter("x_estimator"))
        ));
    }

    #[test]
    fn test_bin_predictor() {
        let x: Vec<f64> = (0..=10).map(f64::from).collect();
        let binned = bin_predictor(&x, 2);
        let mut levels = binned.clone();
        levels.dedup();
        assert_eq!(levels.len(), 2);
        assert_relative_eq!(binned[0], 10.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(binned[10], 20.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        let wide = linspace(1_700_000_099.65, 1_700_000_107.35, GRID_POINTS);
        assert_eq!(*wide.last().unwrap(), 1_700_000_107.35);
    }
}
