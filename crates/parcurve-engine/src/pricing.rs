//! Present value and rate sensitivity of calibration instruments.
//!
//! Pricing is stateless: free functions taking an instrument and a
//! curve bundle. Curves are continuously-compounded zero rates, so
//! `DF(t) = exp(-r(t) * t)` and every sensitivity below derives from
//! `∂DF(t)/∂r(t) = -t * DF(t)`.
//!
//! [`present_value`] returns the calibration residual for each family
//! (plain PV for cash-flow instruments, the quote-space price residual
//! for futures). [`rate_sensitivity`] returns point sensitivities
//! `(t, ∂PV/∂r(t))` per referenced curve; [`node_sensitivity`] projects
//! them onto each curve's nodes through the interpolator weights.

use std::collections::BTreeMap;

use crate::bundle::CurveBundle;
use crate::curve::InterpolatedCurve;
use crate::error::EngineResult;
use crate::instruments::{Cash, FixedLeg, FloatLeg, Fra, Future, Instrument, Swap, TenorSwap};

/// Point sensitivities of one instrument, grouped by curve name.
///
/// Each point is `(time, ∂PV/∂r(time))`. The same time may appear more
/// than once for a curve (an instrument can touch a curve through both
/// discounting and projection); consumers must accumulate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSensitivities {
    points: BTreeMap<String, Vec<(f64, f64)>>,
}

impl CurveSensitivities {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a point sensitivity against a curve.
    pub fn add(&mut self, curve: &str, time: f64, dpv: f64) {
        self.points.entry(curve.to_string()).or_default().push((time, dpv));
    }

    /// The points recorded against a curve; empty if the curve is
    /// untouched.
    #[must_use]
    pub fn points(&self, curve: &str) -> &[(f64, f64)] {
        self.points.get(curve).map_or(&[], Vec::as_slice)
    }

    /// Iterates over (curve name, points) in curve-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(f64, f64)])> {
        self.points
            .iter()
            .map(|(name, points)| (name.as_str(), points.as_slice()))
    }

    /// Names of the curves touched.
    pub fn curves(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }
}

/// The calibration residual of an instrument on a bundle.
///
/// Present value for cash-flow instruments; for futures the residual
/// is in quote space (market price minus curve-implied price).
///
/// # Errors
///
/// Returns [`crate::EngineError::CurveNotFound`] when the instrument
/// references a curve the bundle does not hold, or a math error when
/// evaluation fails under an `Error` extrapolation scheme.
pub fn present_value(instrument: &Instrument, bundle: &CurveBundle) -> EngineResult<f64> {
    match instrument {
        Instrument::Cash(cash) => cash_pv(cash, bundle),
        Instrument::Fra(fra) => fra_pv(fra, bundle),
        Instrument::Future(future) => future_pv(future, bundle),
        Instrument::Swap(swap) => swap_pv(swap, bundle),
        Instrument::TenorSwap(ts) => tenor_swap_pv(ts, bundle),
    }
}

/// Point sensitivities `(t, ∂PV/∂r(t))` of an instrument, per curve.
///
/// # Errors
///
/// Same error conditions as [`present_value`].
pub fn rate_sensitivity(
    instrument: &Instrument,
    bundle: &CurveBundle,
) -> EngineResult<CurveSensitivities> {
    let mut sens = CurveSensitivities::new();
    match instrument {
        Instrument::Cash(cash) => cash_sensitivity(cash, bundle, &mut sens)?,
        Instrument::Fra(fra) => fra_sensitivity(fra, bundle, &mut sens)?,
        Instrument::Future(future) => future_sensitivity(future, bundle, &mut sens)?,
        Instrument::Swap(swap) => swap_sensitivity(swap, bundle, &mut sens)?,
        Instrument::TenorSwap(ts) => tenor_swap_sensitivity(ts, bundle, &mut sens)?,
    }
    Ok(sens)
}

/// Sensitivity of an instrument's residual to each node rate of each
/// referenced curve.
///
/// Point sensitivities are projected onto the nodes through the
/// curve's interpolator weights; the returned vectors have one entry
/// per node of their curve.
///
/// # Errors
///
/// Same error conditions as [`present_value`].
pub fn node_sensitivity(
    instrument: &Instrument,
    bundle: &CurveBundle,
) -> EngineResult<BTreeMap<String, Vec<f64>>> {
    let sens = rate_sensitivity(instrument, bundle)?;
    let mut result = BTreeMap::new();
    for (curve_name, points) in sens.iter() {
        let curve = bundle.get(curve_name)?;
        let mut weights = vec![0.0; curve.node_count()];
        for &(time, dpv) in points {
            // A zero exposure contributes nothing; skipping it also
            // keeps t=0 flows legal under an Error extrapolation side.
            if dpv == 0.0 {
                continue;
            }
            let node_weights = curve.node_sensitivity(time)?;
            for (total, w) in weights.iter_mut().zip(&node_weights) {
                *total += dpv * w;
            }
        }
        result.insert(curve_name.to_string(), weights);
    }
    Ok(result)
}

/// The simple forward over `[start, end]` implied by a curve.
fn forward_rate(
    curve: &InterpolatedCurve,
    start: f64,
    end: f64,
    accrual: f64,
) -> EngineResult<f64> {
    let df_start = curve.discount_factor(start)?;
    let df_end = curve.discount_factor(end)?;
    Ok((df_start / df_end - 1.0) / accrual)
}

fn cash_pv(cash: &Cash, bundle: &CurveBundle) -> EngineResult<f64> {
    let curve = bundle.get(&cash.curve)?;
    let df_start = curve.discount_factor(cash.start_time)?;
    let df_end = curve.discount_factor(cash.end_time)?;
    Ok(-df_start + (1.0 + cash.rate * cash.accrual) * df_end)
}

fn cash_sensitivity(
    cash: &Cash,
    bundle: &CurveBundle,
    sens: &mut CurveSensitivities,
) -> EngineResult<()> {
    let curve = bundle.get(&cash.curve)?;
    let df_start = curve.discount_factor(cash.start_time)?;
    let df_end = curve.discount_factor(cash.end_time)?;
    sens.add(&cash.curve, cash.start_time, cash.start_time * df_start);
    sens.add(
        &cash.curve,
        cash.end_time,
        -(1.0 + cash.rate * cash.accrual) * cash.end_time * df_end,
    );
    Ok(())
}

fn fra_pv(fra: &Fra, bundle: &CurveBundle) -> EngineResult<f64> {
    let disc = bundle.get(&fra.discount_curve)?;
    let fwd = bundle.get(&fra.forward_curve)?;
    let forward = forward_rate(fwd, fra.start_time, fra.end_time, fra.accrual)?;
    let df_settle = disc.discount_factor(fra.start_time)?;
    let payoff = fra.accrual * (forward - fra.rate) / (1.0 + forward * fra.settlement_accrual);
    Ok(df_settle * payoff)
}

fn fra_sensitivity(
    fra: &Fra,
    bundle: &CurveBundle,
    sens: &mut CurveSensitivities,
) -> EngineResult<()> {
    let disc = bundle.get(&fra.discount_curve)?;
    let fwd = bundle.get(&fra.forward_curve)?;
    let ratio = fwd.discount_factor(fra.start_time)? / fwd.discount_factor(fra.end_time)?;
    let forward = (ratio - 1.0) / fra.accrual;
    let df_settle = disc.discount_factor(fra.start_time)?;
    let payoff = fra.accrual * (forward - fra.rate) / (1.0 + forward * fra.settlement_accrual);

    sens.add(
        &fra.discount_curve,
        fra.start_time,
        -fra.start_time * df_settle * payoff,
    );

    // d payoff / dF, with the discount-to-settlement factor included
    let dpayoff = fra.accrual * (1.0 + fra.rate * fra.settlement_accrual)
        / (1.0 + forward * fra.settlement_accrual).powi(2);
    let dforward = ratio / fra.accrual;
    sens.add(
        &fra.forward_curve,
        fra.start_time,
        -df_settle * dpayoff * fra.start_time * dforward,
    );
    sens.add(
        &fra.forward_curve,
        fra.end_time,
        df_settle * dpayoff * fra.end_time * dforward,
    );
    Ok(())
}

fn future_pv(future: &Future, bundle: &CurveBundle) -> EngineResult<f64> {
    let fwd = bundle.get(&future.forward_curve)?;
    let forward = forward_rate(fwd, future.start_time, future.end_time, future.accrual)?;
    Ok(future.price - 100.0 * (1.0 - forward))
}

fn future_sensitivity(
    future: &Future,
    bundle: &CurveBundle,
    sens: &mut CurveSensitivities,
) -> EngineResult<()> {
    let fwd = bundle.get(&future.forward_curve)?;
    let ratio = fwd.discount_factor(future.start_time)? / fwd.discount_factor(future.end_time)?;
    let dforward = ratio / future.accrual;
    sens.add(
        &future.forward_curve,
        future.start_time,
        -100.0 * future.start_time * dforward,
    );
    sens.add(
        &future.forward_curve,
        future.end_time,
        100.0 * future.end_time * dforward,
    );
    Ok(())
}

fn fixed_leg_pv(leg: &FixedLeg, discount: &InterpolatedCurve) -> EngineResult<f64> {
    let mut pv = 0.0;
    for (&t, &tau) in leg.payment_times.iter().zip(&leg.accruals) {
        pv += leg.rate * tau * discount.discount_factor(t)?;
    }
    Ok(pv)
}

fn float_leg_pv(
    leg: &FloatLeg,
    discount: &InterpolatedCurve,
    projection: &InterpolatedCurve,
) -> EngineResult<f64> {
    let mut pv = 0.0;
    for j in 0..leg.len() {
        let forward = forward_rate(projection, leg.start_times[j], leg.end_times[j], leg.accruals[j])?;
        pv += (forward + leg.spread) * leg.accruals[j] * discount.discount_factor(leg.end_times[j])?;
    }
    Ok(pv)
}

fn fixed_leg_sensitivity(
    leg: &FixedLeg,
    discount_name: &str,
    discount: &InterpolatedCurve,
    sign: f64,
    sens: &mut CurveSensitivities,
) -> EngineResult<()> {
    for (&t, &tau) in leg.payment_times.iter().zip(&leg.accruals) {
        let df = discount.discount_factor(t)?;
        sens.add(discount_name, t, -sign * leg.rate * tau * t * df);
    }
    Ok(())
}

fn float_leg_sensitivity(
    leg: &FloatLeg,
    discount_name: &str,
    discount: &InterpolatedCurve,
    projection: &InterpolatedCurve,
    sign: f64,
    sens: &mut CurveSensitivities,
) -> EngineResult<()> {
    for j in 0..leg.len() {
        let start = leg.start_times[j];
        let end = leg.end_times[j];
        let tau = leg.accruals[j];
        let ratio = projection.discount_factor(start)? / projection.discount_factor(end)?;
        let forward = (ratio - 1.0) / tau;
        let df_pay = discount.discount_factor(end)?;

        sens.add(
            discount_name,
            end,
            -sign * (forward + leg.spread) * tau * end * df_pay,
        );
        sens.add(
            &leg.projection_curve,
            start,
            -sign * start * ratio * df_pay,
        );
        sens.add(&leg.projection_curve, end, sign * end * ratio * df_pay);
    }
    Ok(())
}

fn swap_pv(swap: &Swap, bundle: &CurveBundle) -> EngineResult<f64> {
    let disc = bundle.get(&swap.discount_curve)?;
    let proj = bundle.get(&swap.floating.projection_curve)?;
    Ok(fixed_leg_pv(&swap.fixed, disc)? - float_leg_pv(&swap.floating, disc, proj)?)
}

fn swap_sensitivity(
    swap: &Swap,
    bundle: &CurveBundle,
    sens: &mut CurveSensitivities,
) -> EngineResult<()> {
    let disc = bundle.get(&swap.discount_curve)?;
    let proj = bundle.get(&swap.floating.projection_curve)?;
    fixed_leg_sensitivity(&swap.fixed, &swap.discount_curve, disc, 1.0, sens)?;
    float_leg_sensitivity(&swap.floating, &swap.discount_curve, disc, proj, -1.0, sens)
}

fn tenor_swap_pv(ts: &TenorSwap, bundle: &CurveBundle) -> EngineResult<f64> {
    let disc = bundle.get(&ts.discount_curve)?;
    let receive_proj = bundle.get(&ts.receive.projection_curve)?;
    let pay_proj = bundle.get(&ts.pay.projection_curve)?;
    Ok(float_leg_pv(&ts.receive, disc, receive_proj)? - float_leg_pv(&ts.pay, disc, pay_proj)?)
}

fn tenor_swap_sensitivity(
    ts: &TenorSwap,
    bundle: &CurveBundle,
    sens: &mut CurveSensitivities,
) -> EngineResult<()> {
    let disc = bundle.get(&ts.discount_curve)?;
    let receive_proj = bundle.get(&ts.receive.projection_curve)?;
    let pay_proj = bundle.get(&ts.pay.projection_curve)?;
    float_leg_sensitivity(&ts.receive, &ts.discount_curve, disc, receive_proj, 1.0, sens)?;
    float_leg_sensitivity(&ts.pay, &ts.discount_curve, disc, pay_proj, -1.0, sens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use parcurve_math::interpolation::InterpolationScheme;

    fn curve(name: &str, times: &[f64], rates: &[f64]) -> InterpolatedCurve {
        InterpolatedCurve::new(
            name,
            times.to_vec(),
            rates.to_vec(),
            InterpolationScheme::default(),
        )
        .unwrap()
    }

    fn test_bundle() -> CurveBundle {
        CurveBundle::new()
            .with_curve(curve(
                "funding",
                &[0.5, 1.0, 2.0],
                &[0.010, 0.012, 0.014],
            ))
            .with_curve(curve(
                "forward",
                &[0.25, 0.75, 1.5, 2.0],
                &[0.013, 0.015, 0.016, 0.017],
            ))
    }

    /// Checks every entry of `node_sensitivity` against a centered
    /// finite-difference bump of the instrument's residual.
    fn assert_node_sensitivity_matches_fd(instrument: &Instrument, bundle: &CurveBundle) {
        let analytic = node_sensitivity(instrument, bundle).unwrap();
        let h = 1e-6;
        for (curve_name, weights) in &analytic {
            let base = bundle.get(curve_name).unwrap();
            assert_eq!(weights.len(), base.node_count());
            for j in 0..base.node_count() {
                let mut up_rates = base.rates().to_vec();
                let mut dn_rates = base.rates().to_vec();
                up_rates[j] += h;
                dn_rates[j] -= h;

                let mut up_bundle = bundle.clone();
                up_bundle.insert(
                    InterpolatedCurve::new(
                        curve_name.clone(),
                        base.times().to_vec(),
                        up_rates,
                        base.scheme(),
                    )
                    .unwrap(),
                );
                let mut dn_bundle = bundle.clone();
                dn_bundle.insert(
                    InterpolatedCurve::new(
                        curve_name.clone(),
                        base.times().to_vec(),
                        dn_rates,
                        base.scheme(),
                    )
                    .unwrap(),
                );

                let pv_up = present_value(instrument, &up_bundle).unwrap();
                let pv_dn = present_value(instrument, &dn_bundle).unwrap();
                let fd = (pv_up - pv_dn) / (2.0 * h);
                assert_relative_eq!(weights[j], fd, epsilon = 1e-8, max_relative = 1e-4);
            }
        }
    }

    #[test]
    fn test_cash_pv_at_par_is_zero() {
        // Flat 1% curve: the par deposit rate over [0, 0.25] is
        // (exp(0.01 * 0.25) - 1) / 0.25.
        let bundle = CurveBundle::new().with_curve(curve(
            "funding",
            &[0.25, 0.5, 1.0],
            &[0.01, 0.01, 0.01],
        ));
        let par = ((0.01f64 * 0.25).exp() - 1.0) / 0.25;
        let cash = Instrument::Cash(Cash::new(0.0, 0.25, 0.25, par, "funding"));
        let pv = present_value(&cash, &bundle).unwrap();
        assert_relative_eq!(pv, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_cash_pv_sign() {
        // A deposit paying more than the curve's forward has positive PV
        let bundle = CurveBundle::new().with_curve(curve(
            "funding",
            &[0.25, 0.5, 1.0],
            &[0.01, 0.01, 0.01],
        ));
        let cash = Instrument::Cash(Cash::new(0.0, 0.25, 0.25, 0.02, "funding"));
        assert!(present_value(&cash, &bundle).unwrap() > 0.0);
    }

    #[test]
    fn test_fra_pv_zero_at_curve_forward() {
        let bundle = test_bundle();
        let fwd_curve = bundle.get("forward").unwrap();
        let forward = forward_rate(fwd_curve, 0.5, 1.0, 0.5).unwrap();
        let fra = Instrument::Fra(Fra::new(0.5, 1.0, 0.5, forward, "funding", "forward"));
        assert_relative_eq!(present_value(&fra, &bundle).unwrap(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_fra_pv_hand_value() {
        // Single flat curve at 2%, FRA 0.5 -> 1.0, strike 1%
        let bundle = CurveBundle::new().with_curve(curve(
            "funding",
            &[0.5, 1.0, 2.0],
            &[0.02, 0.02, 0.02],
        ));
        let fra = Instrument::Fra(Fra::new(0.5, 1.0, 0.5, 0.01, "funding", "funding"));
        let df_start = (-0.02f64 * 0.5).exp();
        let df_end = (-0.02f64 * 1.0).exp();
        let forward = (df_start / df_end - 1.0) / 0.5;
        let expected = df_start * 0.5 * (forward - 0.01) / (1.0 + forward * 0.5);
        assert_relative_eq!(
            present_value(&fra, &bundle).unwrap(),
            expected,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_future_residual_quote_space() {
        let bundle = test_bundle();
        let fwd_curve = bundle.get("forward").unwrap();
        let forward = forward_rate(fwd_curve, 0.75, 1.0, 0.25).unwrap();
        let fair_price = 100.0 * (1.0 - forward);
        let future = Instrument::Future(Future::new(0.75, 1.0, 0.25, fair_price, "forward"));
        assert_relative_eq!(
            present_value(&future, &bundle).unwrap(),
            0.0,
            epsilon = 1e-12
        );

        // A cheaper market price lowers the residual one-for-one
        let off = Instrument::Future(Future::new(0.75, 1.0, 0.25, fair_price - 0.10, "forward"));
        assert_relative_eq!(
            present_value(&off, &bundle).unwrap(),
            -0.10,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_one_period_swap_hand_value() {
        // Single curve: the float leg over [0, 1] collapses to 1 - DF(1)
        let bundle = CurveBundle::new().with_curve(curve(
            "funding",
            &[0.5, 1.0, 2.0],
            &[0.02, 0.02, 0.02],
        ));
        let swap = Instrument::Swap(Swap::new(
            FixedLeg::new(vec![1.0], vec![1.0], 0.015),
            FloatLeg::new(vec![0.0], vec![1.0], vec![1.0], "funding"),
            "funding",
        ));
        let df = (-0.02f64).exp();
        let expected = 0.015 * df - (1.0 - df);
        assert_relative_eq!(
            present_value(&swap, &bundle).unwrap(),
            expected,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_tenor_swap_same_curve_collapses_to_spread_annuity() {
        // When both legs project the discount curve, the forwards
        // cancel and PV is the spread annuity.
        let bundle = CurveBundle::new().with_curve(curve(
            "funding",
            &[0.25, 0.5, 1.0],
            &[0.012, 0.013, 0.014],
        ));
        let starts = vec![0.0, 0.25, 0.5, 0.75];
        let ends = vec![0.25, 0.5, 0.75, 1.0];
        let accruals = vec![0.25; 4];
        let spread = 0.0015;
        let ts = Instrument::TenorSwap(TenorSwap::new(
            FloatLeg::new(starts.clone(), ends.clone(), accruals.clone(), "funding")
                .with_spread(spread),
            FloatLeg::new(starts, ends.clone(), accruals, "funding"),
            "funding",
        ));
        let funding = bundle.get("funding").unwrap();
        let annuity: f64 = ends
            .iter()
            .map(|&t| 0.25 * funding.discount_factor(t).unwrap())
            .sum();
        assert_relative_eq!(
            present_value(&ts, &bundle).unwrap(),
            spread * annuity,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_cash_node_sensitivity_matches_fd() {
        let bundle = test_bundle();
        let cash = Instrument::Cash(Cash::new(0.04, 1.0, 0.9722, 0.011, "funding"));
        assert_node_sensitivity_matches_fd(&cash, &bundle);
    }

    #[test]
    fn test_fra_node_sensitivity_matches_fd() {
        let bundle = test_bundle();
        let fra = Instrument::Fra(Fra::new(0.5, 1.0, 0.5069, 0.0125, "funding", "forward"));
        assert_node_sensitivity_matches_fd(&fra, &bundle);
    }

    #[test]
    fn test_future_node_sensitivity_matches_fd() {
        let bundle = test_bundle();
        let future = Instrument::Future(Future::new(0.75, 1.0, 0.2528, 98.70, "forward"));
        assert_node_sensitivity_matches_fd(&future, &bundle);
    }

    #[test]
    fn test_swap_node_sensitivity_matches_fd() {
        let bundle = test_bundle();
        let swap = Instrument::Swap(Swap::new(
            FixedLeg::new(vec![1.0, 2.0], vec![1.0, 1.0], 0.013),
            FloatLeg::new(
                vec![0.0, 0.5, 1.0, 1.5],
                vec![0.5, 1.0, 1.5, 2.0],
                vec![0.5; 4],
                "forward",
            ),
            "funding",
        ));
        assert_node_sensitivity_matches_fd(&swap, &bundle);
    }

    #[test]
    fn test_tenor_swap_node_sensitivity_matches_fd() {
        let bundle = test_bundle();
        let starts = vec![0.0, 0.25, 0.5, 0.75];
        let ends = vec![0.25, 0.5, 0.75, 1.0];
        let ts = Instrument::TenorSwap(TenorSwap::new(
            FloatLeg::new(starts.clone(), ends.clone(), vec![0.25; 4], "forward")
                .with_spread(0.002),
            FloatLeg::new(starts, ends, vec![0.25; 4], "funding"),
            "funding",
        ));
        assert_node_sensitivity_matches_fd(&ts, &bundle);
    }

    #[test]
    fn test_sensitivities_accumulate_per_curve() {
        let mut sens = CurveSensitivities::new();
        sens.add("funding", 0.5, 0.1);
        sens.add("funding", 0.5, 0.2);
        sens.add("forward", 1.0, -0.3);
        assert_eq!(sens.points("funding").len(), 2);
        assert_eq!(sens.points("forward"), &[(1.0, -0.3)]);
        assert_eq!(sens.points("other"), &[]);
        let names: Vec<&str> = sens.curves().collect();
        assert_eq!(names, vec!["forward", "funding"]);
    }

    #[test]
    fn test_missing_curve_fails_pricing() {
        let bundle = CurveBundle::new().with_curve(curve(
            "funding",
            &[0.5, 1.0, 2.0],
            &[0.01, 0.01, 0.01],
        ));
        let fra = Instrument::Fra(Fra::new(0.5, 1.0, 0.5, 0.01, "funding", "forward"));
        assert!(matches!(
            present_value(&fra, &bundle),
            Err(crate::EngineError::CurveNotFound { .. })
        ));
    }
}
