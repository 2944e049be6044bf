//! ProbCut forward pruning.
//!
//! Before a node is searched to `deep` plies, a much cheaper probe at the
//! calibrated shallow depth is run with a null window placed where the linear
//! model says the deep value would leave `(alpha, beta)` with the configured
//! confidence. If the probe confirms it, the node is cut with the window bound.

use log::{debug, trace};

use crate::constants::{DEFAULT_THRESHOLD, SCORE_INF};
use crate::cutoff::Cutoff;
use crate::error::ProbCutError;
use crate::search::{Bound, Decision, ProbeSearch};
use crate::store::CalibrationStore;
use crate::types::{Depth, Score};

/// Named confidence presets for the cutoff threshold.
///
/// `Level0` cuts most often and `Level5` least; `None` turns ProbCut off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Selectivity {
    #[default]
    Level0,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    None,
}

impl Selectivity {
    /// Threshold in standard deviations and the one-sided hit rate it buys, in percent.
    const fn confidence(self) -> (f64, i32) {
        match self {
            Selectivity::Level0 => (1.0, 68),
            Selectivity::Level1 => (1.1, 73),
            Selectivity::Level2 => (1.5, 87),
            Selectivity::Level3 => (2.0, 95),
            Selectivity::Level4 => (2.6, 98),
            Selectivity::Level5 => (3.3, 99),
            Selectivity::None => (999.0, 100),
        }
    }

    #[inline]
    pub fn t_value(self) -> f64 {
        self.confidence().0
    }

    #[inline]
    pub fn probability(self) -> i32 {
        self.confidence().1
    }

    /// Maps a level number to a preset; anything above 5 disables ProbCut.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Selectivity::Level0,
            1 => Selectivity::Level1,
            2 => Selectivity::Level2,
            3 => Selectivity::Level3,
            4 => Selectivity::Level4,
            5 => Selectivity::Level5,
            _ => Selectivity::None,
        }
    }

    #[inline]
    pub fn is_enabled(self) -> bool {
        self != Selectivity::None
    }
}

/// ProbCut state owned by one search engine.
///
/// Populate the calibration and settings before searching; during search the
/// instance is only read, so it can be shared between search threads.
#[derive(Clone, Debug)]
pub struct ProbCut {
    threshold: f64,
    enabled: bool,
    store: CalibrationStore,
}

impl Default for ProbCut {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbCut {
    /// Creates a disabled instance with an empty store and threshold 1.0.
    pub fn new() -> Self {
        Self::with_store(CalibrationStore::new())
    }

    /// Creates a disabled instance around an existing store.
    pub fn with_store(store: CalibrationStore) -> Self {
        ProbCut {
            threshold: DEFAULT_THRESHOLD,
            enabled: false,
            store,
        }
    }

    /// Restores the freshly constructed state, dropping all calibration.
    pub fn reset(&mut self) {
        self.threshold = DEFAULT_THRESHOLD;
        self.enabled = false;
        self.store.clear();
    }

    pub fn set_enabled(&mut self, flag: bool) {
        debug!("probcut {}", if flag { "enabled" } else { "disabled" });
        self.enabled = flag;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the number of standard deviations a prediction must clear.
    ///
    /// Negative or non-finite values are rejected and the previous threshold is kept.
    pub fn set_threshold(&mut self, t: f64) -> Result<(), ProbCutError> {
        if !t.is_finite() || t < 0.0 {
            return Err(ProbCutError::InvalidThreshold(t));
        }
        debug!("probcut threshold set to {t}");
        self.threshold = t;
        Ok(())
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Applies a selectivity preset to both the threshold and the enable flag.
    pub fn set_selectivity(&mut self, selectivity: Selectivity) {
        self.threshold = selectivity.t_value();
        self.enabled = selectivity.is_enabled();
        debug!(
            "probcut selectivity {:?} (t={}, {}%)",
            selectivity,
            self.threshold,
            selectivity.probability()
        );
    }

    #[inline]
    pub fn store(&self) -> &CalibrationStore {
        &self.store
    }

    /// Adds a calibration record to the store.
    pub fn add_cutoff(&mut self, cutoff: Cutoff) -> Result<(), ProbCutError> {
        self.store.add_cutoff(cutoff)
    }

    /// Returns the `index`-th calibration record for `deep`.
    #[inline]
    pub fn get_cutoff(&self, deep: Depth, index: usize) -> Option<Cutoff> {
        self.store.get_cutoff(deep, index)
    }

    /// Decides whether the node about to be searched to `deep` can be cut.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Search context positioned on the node.
    /// * `deep` - Depth the node would be searched to.
    /// * `alpha` - Alpha bound.
    /// * `beta` - Beta bound.
    ///
    /// # Returns
    ///
    /// * `Decision::Cutoff` - The deep value lies outside the window with the
    ///   configured confidence; the value is `beta` (lower bound) or `alpha`
    ///   (upper bound).
    /// * `Decision::NoCutoff` - The full search must be performed. Also returned
    ///   when disabled, uncalibrated, nested inside another probe, or when a
    ///   probe is aborted.
    ///
    /// Window edges at or beyond `±SCORE_INF` are treated as open: no probe is
    /// run against them, so a window lying entirely outside that range never cuts.
    pub fn try_cutoff<S>(&self, ctx: &mut S, deep: Depth, alpha: Score, beta: Score) -> Decision
    where
        S: ProbeSearch + ?Sized,
    {
        if !self.enabled || ctx.is_probing() {
            return Decision::NoCutoff;
        }

        let cutoffs = self.store.cutoffs(deep);
        if cutoffs.is_empty() {
            return Decision::NoCutoff;
        }

        ctx.set_probing(true);
        let decision = self.probe_cutoffs(ctx, cutoffs, alpha, beta);
        ctx.set_probing(false);
        decision
    }

    /// Tries each usable record in insertion order until one proves a cutoff.
    fn probe_cutoffs<S>(
        &self,
        ctx: &mut S,
        cutoffs: &[Cutoff],
        alpha: Score,
        beta: Score,
    ) -> Decision
    where
        S: ProbeSearch + ?Sized,
    {
        let t = self.threshold;

        for cutoff in cutoffs.iter().filter(|c| c.is_usable()) {
            let margin = cutoff.margin(t);

            if beta < SCORE_INF
                && let Some(bound) = cutoff.fail_high_bound(beta, t)
            {
                let Some(score) = ctx.probe(cutoff.shallow, bound - 1, bound) else {
                    trace!("probcut probe aborted at depth {}", cutoff.shallow);
                    return Decision::NoCutoff;
                };
                if cutoff.predict(score) - margin >= beta as f64 {
                    trace!("probcut fail-high {cutoff} shallow={score} beta={beta}");
                    return Decision::Cutoff {
                        value: beta,
                        bound: Bound::Lower,
                    };
                }
            }

            if alpha > -SCORE_INF
                && let Some(bound) = cutoff.fail_low_bound(alpha, t)
            {
                let Some(score) = ctx.probe(cutoff.shallow, bound, bound + 1) else {
                    trace!("probcut probe aborted at depth {}", cutoff.shallow);
                    return Decision::NoCutoff;
                };
                if cutoff.predict(score) + margin <= alpha as f64 {
                    trace!("probcut fail-low {cutoff} shallow={score} alpha={alpha}");
                    return Decision::Cutoff {
                        value: alpha,
                        bound: Bound::Upper,
                    };
                }
            }
        }

        Decision::NoCutoff
    }
}
