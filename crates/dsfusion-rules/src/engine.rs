//! FusionEngine: one configured rule behind the rule-agnostic
//! [`AccumulatorState`].

use dsfusion_core::errors::{FusionError, FusionResult};
use dsfusion_core::traits::ICombinationRule;
use dsfusion_core::{
    AccumulatorState, EvidenceBatch, EvidenceWeights, FusionConfig, MassFunction, RuleKind,
};
use tracing::{debug, instrument};

use crate::dempster::DempsterRule;
use crate::murphy::MurphyRule;
use crate::overwrite::OverwriteRule;
use crate::yager::YagerRule;
use crate::zhang::ZhangRule;

/// Unwrap the state variant belonging to `$variant`, or fail with a
/// mismatch error naming both rules.
macro_rules! expect_state {
    ($state:expr, $variant:ident) => {
        match $state {
            AccumulatorState::$variant(inner) => Ok(inner),
            other => Err(state_mismatch(RuleKind::$variant, other.kind())),
        }
    };
}

fn state_mismatch(expected: RuleKind, found: RuleKind) -> FusionError {
    FusionError::InvalidArgument(format!(
        "accumulator state produced by {found} cannot be used with {expected}"
    ))
}

#[derive(Debug, Clone, Copy)]
enum ConfiguredRule {
    DempsterShafer(DempsterRule),
    Murphy(MurphyRule),
    Yager(YagerRule),
    Zhang(ZhangRule),
    Overwrite(OverwriteRule),
}

impl ConfiguredRule {
    fn kind(&self) -> RuleKind {
        match self {
            Self::DempsterShafer(_) => RuleKind::DempsterShafer,
            Self::Murphy(_) => RuleKind::Murphy,
            Self::Yager(_) => RuleKind::Yager,
            Self::Zhang(_) => RuleKind::Zhang,
            Self::Overwrite(_) => RuleKind::Overwrite,
        }
    }
}

/// Rule dispatcher.
///
/// Holds one combination rule plus the retention bound and uniform input
/// weight that [`FusionEngine::update`] applies on every call.
#[derive(Debug, Clone)]
pub struct FusionEngine {
    rule: ConfiguredRule,
    max_retained: Option<usize>,
    input_weight: f64,
}

impl FusionEngine {
    /// An engine for `kind` with default settings: unbounded, unweighted.
    pub fn new(kind: RuleKind) -> Self {
        let rule = match kind {
            RuleKind::DempsterShafer => ConfiguredRule::DempsterShafer(DempsterRule::new()),
            RuleKind::Murphy => ConfiguredRule::Murphy(MurphyRule::new()),
            RuleKind::Yager => ConfiguredRule::Yager(YagerRule::new()),
            RuleKind::Zhang => ConfiguredRule::Zhang(ZhangRule::new()),
            RuleKind::Overwrite => ConfiguredRule::Overwrite(OverwriteRule::new()),
        };
        let defaults = FusionConfig::default();
        Self {
            rule,
            max_retained: defaults.max_retained,
            input_weight: defaults.input_weight,
        }
    }

    /// Build from configuration. Fails on an unknown rule selector or an
    /// invalid config before anything is combined.
    pub fn from_config(config: &FusionConfig) -> FusionResult<Self> {
        config.validate()?;
        let kind = config.rule_kind()?;
        let rule = match kind {
            RuleKind::Yager => ConfiguredRule::Yager(YagerRule::with_strict_universal_set(
                config.strict_universal_set,
            )),
            RuleKind::Zhang => ConfiguredRule::Zhang(ZhangRule::with_max_powerset_hypotheses(
                config.max_powerset_hypotheses,
            )),
            other => Self::new(other).rule,
        };
        debug!(rule = %kind, max_retained = ?config.max_retained, "fusion engine configured");
        Ok(Self {
            rule,
            max_retained: config.max_retained,
            input_weight: config.input_weight,
        })
    }

    /// Build from a rule selector string such as `"ZHANG"`.
    pub fn from_selector(selector: &str) -> FusionResult<Self> {
        Ok(Self::new(selector.parse()?))
    }

    pub fn kind(&self) -> RuleKind {
        self.rule.kind()
    }

    pub fn max_retained(&self) -> Option<usize> {
        self.max_retained
    }

    pub fn input_weight(&self) -> f64 {
        self.input_weight
    }

    /// Fold `batch` into `prior` using the engine's configured window and
    /// input weight.
    pub fn update(
        &self,
        batch: &EvidenceBatch,
        prior: Option<AccumulatorState>,
    ) -> FusionResult<AccumulatorState> {
        self.combine_windowed(batch, self.max_retained, prior, self.input_weight)
    }

    /// Fold one batch of new evidence into `prior`, or into a fresh state.
    ///
    /// `input_weight` above `ZERO_WEIGHT_DELTA` is applied to every item of
    /// the batch; anything at or below it means unweighted.
    pub fn combine(
        &self,
        batch: &EvidenceBatch,
        prior: Option<AccumulatorState>,
        input_weight: f64,
    ) -> FusionResult<AccumulatorState> {
        self.combine_windowed(batch, None, prior, input_weight)
    }

    /// [`FusionEngine::combine`] bounded to `max_retained` evidence items.
    #[instrument(skip_all, fields(rule = %self.kind(), batch = batch.len(), max_retained = ?max_retained))]
    pub fn combine_windowed(
        &self,
        batch: &EvidenceBatch,
        max_retained: Option<usize>,
        prior: Option<AccumulatorState>,
        input_weight: f64,
    ) -> FusionResult<AccumulatorState> {
        let weights = EvidenceWeights::uniform(batch, input_weight)?;
        let weights = weights.as_ref();

        match &self.rule {
            ConfiguredRule::DempsterShafer(rule) => {
                let prior = prior.map(|s| expect_state!(s, DempsterShafer)).transpose()?;
                rule.combine_windowed(batch, max_retained, prior, weights)
                    .map(AccumulatorState::DempsterShafer)
            }
            ConfiguredRule::Murphy(rule) => {
                let prior = prior.map(|s| expect_state!(s, Murphy)).transpose()?;
                rule.combine_windowed(batch, max_retained, prior, weights)
                    .map(AccumulatorState::Murphy)
            }
            ConfiguredRule::Yager(rule) => {
                let prior = prior.map(|s| expect_state!(s, Yager)).transpose()?;
                rule.combine_windowed(batch, max_retained, prior, weights)
                    .map(AccumulatorState::Yager)
            }
            ConfiguredRule::Zhang(rule) => {
                let prior = prior.map(|s| expect_state!(s, Zhang)).transpose()?;
                rule.combine_windowed(batch, max_retained, prior, weights)
                    .map(AccumulatorState::Zhang)
            }
            ConfiguredRule::Overwrite(rule) => {
                let prior = prior.map(|s| expect_state!(s, Overwrite)).transpose()?;
                rule.combine_windowed(batch, max_retained, prior, weights)
                    .map(AccumulatorState::Overwrite)
            }
        }
    }

    /// Merge two independently maintained states of this engine's rule.
    #[instrument(skip_all, fields(rule = %self.kind()))]
    pub fn combine_states(
        &self,
        a: AccumulatorState,
        b: AccumulatorState,
        max_retained: Option<usize>,
    ) -> FusionResult<AccumulatorState> {
        match &self.rule {
            ConfiguredRule::DempsterShafer(rule) => rule
                .combine_two_states(
                    expect_state!(a, DempsterShafer)?,
                    expect_state!(b, DempsterShafer)?,
                    max_retained,
                )
                .map(AccumulatorState::DempsterShafer),
            ConfiguredRule::Murphy(rule) => rule
                .combine_two_states(expect_state!(a, Murphy)?, expect_state!(b, Murphy)?, max_retained)
                .map(AccumulatorState::Murphy),
            ConfiguredRule::Yager(rule) => rule
                .combine_two_states(expect_state!(a, Yager)?, expect_state!(b, Yager)?, max_retained)
                .map(AccumulatorState::Yager),
            ConfiguredRule::Zhang(rule) => rule
                .combine_two_states(expect_state!(a, Zhang)?, expect_state!(b, Zhang)?, max_retained)
                .map(AccumulatorState::Zhang),
            ConfiguredRule::Overwrite(rule) => rule
                .combine_two_states(
                    expect_state!(a, Overwrite)?,
                    expect_state!(b, Overwrite)?,
                    max_retained,
                )
                .map(AccumulatorState::Overwrite),
        }
    }

    /// The presentable distribution with every value clamped into [0, 1],
    /// or `None` when the state holds nothing yet.
    pub fn final_probabilities(
        &self,
        state: &AccumulatorState,
    ) -> FusionResult<Option<MassFunction>> {
        let probabilities = match (&self.rule, state) {
            (ConfiguredRule::DempsterShafer(rule), AccumulatorState::DempsterShafer(s)) => {
                rule.final_probabilities(s)
            }
            (ConfiguredRule::Murphy(rule), AccumulatorState::Murphy(s)) => {
                rule.final_probabilities(s)
            }
            (ConfiguredRule::Yager(rule), AccumulatorState::Yager(s)) => {
                rule.final_probabilities(s)
            }
            (ConfiguredRule::Zhang(rule), AccumulatorState::Zhang(s)) => {
                rule.final_probabilities(s)
            }
            (ConfiguredRule::Overwrite(rule), AccumulatorState::Overwrite(s)) => {
                rule.final_probabilities(s)
            }
            (_, other) => return Err(state_mismatch(self.kind(), other.kind())),
        };
        Ok(probabilities.map(MassFunction::clamped))
    }
}
