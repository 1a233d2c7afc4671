//! Product — a tracked grocery item with a lifecycle state and countdown.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::scope::Scope;
use crate::time::{self, Timestamp};

/// Lifecycle state of a product.
///
/// Exactly one state is current at a time. Products enter as [`InList`]
/// and move between the other states only through the repository
/// transition methods; no state is terminal.
///
/// [`InList`]: ProductState::InList
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductState {
    /// On the shopping list, not bought yet.
    InList,
    /// Bought and stored, counting down to its expiry.
    InFridge,
    /// Consumed.
    Used,
    /// Thrown away.
    Trashed,
}

/// The four mutually exclusive flag columns used by the storage schema.
///
/// Kept as an explicit value type so the schema encoding stays in one
/// place; everything above the adapter works with [`ProductState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFlags {
    /// `inlist` column.
    pub in_list: bool,
    /// `infridge` column.
    pub in_fridge: bool,
    /// `alreadyused` column.
    pub already_used: bool,
    /// `intrash` column.
    pub in_trash: bool,
}

/// Flag combination that does not describe exactly one lifecycle state.
#[derive(Debug, Clone, Copy, Error)]
#[error("state flags do not describe exactly one lifecycle state: {0:?}")]
pub struct InvalidStateFlags(pub StateFlags);

impl ProductState {
    /// Encode the state as the four legacy flag columns.
    #[must_use]
    pub fn to_flags(self) -> StateFlags {
        StateFlags {
            in_list: self == Self::InList,
            in_fridge: self == Self::InFridge,
            already_used: self == Self::Used,
            in_trash: self == Self::Trashed,
        }
    }

    /// Decode the four flag columns.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateFlags`] unless exactly one flag is set.
    pub fn from_flags(flags: StateFlags) -> Result<Self, InvalidStateFlags> {
        match (
            flags.in_list,
            flags.in_fridge,
            flags.already_used,
            flags.in_trash,
        ) {
            (true, false, false, false) => Ok(Self::InList),
            (false, true, false, false) => Ok(Self::InFridge),
            (false, false, true, false) => Ok(Self::Used),
            (false, false, false, true) => Ok(Self::Trashed),
            _ => Err(InvalidStateFlags(flags)),
        }
    }
}

/// Which product listing the front end asked for.
///
/// The bot protocol encodes these as the integers 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListView {
    /// Products still on the shopping list, ordered by name.
    Shopping,
    /// Products in the fridge, ordered by soonest expiry.
    Fridge,
    /// Products already used, ordered by soonest expiry.
    Used,
}

impl ListView {
    /// Map a raw protocol code to a view.
    ///
    /// Unknown codes yield `None`; callers translate that into an empty
    /// listing rather than an error.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Shopping),
            2 => Some(Self::Fridge),
            3 => Some(Self::Used),
            _ => None,
        }
    }
}

/// A tracked grocery item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned surrogate id; `None` until persisted.
    pub id: Option<i64>,
    /// Owning (user, chat) pair.
    pub scope: Scope,
    /// Name as entered by the user; keys lookups and transitions.
    pub name: String,
    /// Weight or quantity as entered by the user.
    pub weight: f64,
    /// Current lifecycle state.
    pub state: ProductState,
    /// Whether the expiry countdown is active.
    pub timer_enabled: bool,
    /// Start of the countdown window.
    pub created_at: Timestamp,
    /// End of the countdown window.
    pub finished_at: Timestamp,
    /// Cached `finished_at - now`, refreshed before reads. Negative once
    /// expired.
    #[serde(with = "duration_seconds")]
    pub rest_time: Duration,
}

impl Product {
    /// Start building a product.
    #[must_use]
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }
}

/// Builder for [`Product`]; new products default to the shopping list
/// with no active countdown.
#[derive(Debug, Default)]
pub struct ProductBuilder {
    scope: Option<Scope>,
    name: Option<String>,
    weight: f64,
    state: Option<ProductState>,
    timer_enabled: bool,
    window: Option<(Timestamp, Timestamp)>,
}

impl ProductBuilder {
    /// Owning scope.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Product name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Weight or quantity.
    #[must_use]
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Initial lifecycle state.
    #[must_use]
    pub fn state(mut self, state: ProductState) -> Self {
        self.state = Some(state);
        self
    }

    /// Whether the expiry countdown is active.
    #[must_use]
    pub fn timer_enabled(mut self, enabled: bool) -> Self {
        self.timer_enabled = enabled;
        self
    }

    /// Countdown window from `from` until `until`.
    #[must_use]
    pub fn window(mut self, from: Timestamp, until: Timestamp) -> Self {
        self.window = Some((from, until));
        self
    }

    /// Build the product.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the scope is missing or the name
    /// is empty.
    pub fn build(self) -> Result<Product, ValidationError> {
        let scope = self.scope.ok_or(ValidationError::MissingScope)?;
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::EmptyName)?;

        let ts = time::now();
        let (created_at, finished_at) = self.window.unwrap_or((ts, ts));

        Ok(Product {
            id: None,
            scope,
            name,
            weight: self.weight,
            state: self.state.unwrap_or(ProductState::InList),
            timer_enabled: self.timer_enabled,
            created_at,
            finished_at,
            rest_time: time::rest_time(finished_at, ts),
        })
    }
}

/// Projection returned by listings: the fields the bot renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEntry {
    /// Store-assigned surrogate id.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Weight or quantity.
    pub weight: f64,
    /// Whether the expiry countdown is active.
    pub timer_enabled: bool,
    /// Remaining time; `None` for the shopping view, which carries no
    /// countdown.
    pub rest_time: Option<Duration>,
}

mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        i64::deserialize(deserializer).map(Duration::seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> Scope {
        Scope::new(1, 100)
    }

    #[test]
    fn should_set_exactly_one_flag_per_state() {
        for state in [
            ProductState::InList,
            ProductState::InFridge,
            ProductState::Used,
            ProductState::Trashed,
        ] {
            let flags = state.to_flags();
            let set = [
                flags.in_list,
                flags.in_fridge,
                flags.already_used,
                flags.in_trash,
            ]
            .iter()
            .filter(|flag| **flag)
            .count();
            assert_eq!(set, 1, "{state:?} must set exactly one flag");
        }
    }

    #[test]
    fn should_roundtrip_every_state_through_flags() {
        for state in [
            ProductState::InList,
            ProductState::InFridge,
            ProductState::Used,
            ProductState::Trashed,
        ] {
            assert_eq!(ProductState::from_flags(state.to_flags()).unwrap(), state);
        }
    }

    #[test]
    fn should_reject_flags_with_no_state_set() {
        let flags = StateFlags {
            in_list: false,
            in_fridge: false,
            already_used: false,
            in_trash: false,
        };
        assert!(ProductState::from_flags(flags).is_err());
    }

    #[test]
    fn should_reject_flags_with_two_states_set() {
        // The overlap the legacy trash transition used to write.
        let flags = StateFlags {
            in_list: false,
            in_fridge: false,
            already_used: true,
            in_trash: true,
        };
        assert!(ProductState::from_flags(flags).is_err());
    }

    #[test]
    fn should_map_known_codes_to_views() {
        assert_eq!(ListView::from_code(1), Some(ListView::Shopping));
        assert_eq!(ListView::from_code(2), Some(ListView::Fridge));
        assert_eq!(ListView::from_code(3), Some(ListView::Used));
    }

    #[test]
    fn should_map_unknown_codes_to_none() {
        assert_eq!(ListView::from_code(0), None);
        assert_eq!(ListView::from_code(4), None);
        assert_eq!(ListView::from_code(-1), None);
    }

    #[test]
    fn should_build_product_with_defaults() {
        let product = Product::builder()
            .scope(scope())
            .name("milk")
            .weight(1.0)
            .build()
            .unwrap();

        assert!(product.id.is_none());
        assert_eq!(product.state, ProductState::InList);
        assert!(!product.timer_enabled);
        assert_eq!(product.created_at, product.finished_at);
    }

    #[test]
    fn should_compute_rest_time_from_window() {
        let from = crate::time::now();
        let until = from + Duration::hours(1);
        let product = Product::builder()
            .scope(scope())
            .name("milk")
            .window(from, until)
            .build()
            .unwrap();

        let secs = product.rest_time.num_seconds();
        assert!((3595..=3600).contains(&secs), "got {secs}");
    }

    #[test]
    fn should_reject_product_without_scope() {
        let result = Product::builder().name("milk").build();
        assert_eq!(result.unwrap_err(), ValidationError::MissingScope);
    }

    #[test]
    fn should_reject_product_with_empty_name() {
        let result = Product::builder().scope(scope()).name("").build();
        assert_eq!(result.unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn should_roundtrip_product_through_serde_json() {
        let product = Product::builder()
            .scope(scope())
            .name("milk")
            .weight(0.5)
            .state(ProductState::InFridge)
            .timer_enabled(true)
            .build()
            .unwrap();

        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product, parsed);
    }
}
