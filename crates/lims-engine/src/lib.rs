//! Band/threshold rule-generation engine.
//!
//! Pure, synchronous policy code: given a parameter's target, unit, and
//! banding mode, produce the ordered rule records whose comparison clauses
//! partition the value axis into perfect/OK/not-OK zones. Also hosts the
//! locale-aware numeric parser used to read free-text targets and the
//! deviation-band policies for the nutrition parameter families.

pub mod bands;
pub mod builder;
pub mod deviation;
pub mod error;
pub mod families;
pub mod locale;
pub mod numeric;

pub use bands::{ActiveBands, active_bands, limit3_threshold, mineral_bands};
pub use builder::{
    GenerationWarning, Mode, NutritionInput, ParamSpec, build_nutrition_rules, build_rules,
};
pub use deviation::{
    Bounds, DEFAULT_DEVIATION_PERCENT, DEVIATION_PERCENT_MAX, DeviationPolicy, compute_bounds,
    deviation_for, ordered_bounds,
};
pub use error::{EngineError, Result};
pub use families::{
    FamilyGroup, LOCKED_UNIT, NUTRITION_PARAMETERS, NutritionParameter, nutrition_parameter,
    select_policy,
};
pub use locale::{ParsedNumber, parse_number_with_unit};
pub use numeric::{clamp_lower_to_zero, format2, quantize2, quantize4};
