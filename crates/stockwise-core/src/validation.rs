//! # Validation Module
//!
//! Client-side input validation for every write the dashboard performs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command parsing (apps/dashboard)                             │
//! │  └── Token shape: numbers are numbers, dates are dates                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── SKU reference integrity (CorruptReference)                        │
//! │  ├── Positive quantity / price, date not in the future                 │
//! │  └── Name and unit of measure limits                                   │
//! │           │   (no request is sent when this layer rejects)             │
//! │           ▼                                                             │
//! │  Layer 3: StockWise backend                                            │
//! │  └── Existence, insufficient stock, storage constraints                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockwise_core::validation::{parse_stock_level, validate_sku_ref};
//!
//! assert_eq!(parse_stock_level(" 42 ").unwrap(), 42);
//! assert!(validate_sku_ref(Some("short")).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{NewSku, SaleDraft, SaleRecord, SkuDetailsUpdate};
use crate::{MAX_SKU_NAME_LEN, MAX_UNIT_OF_MEASURE_LEN, MIN_SKU_ID_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Reference Validators
// =============================================================================

/// Validates an SKU reference carried by a form and returns it trimmed.
///
/// ## Rules
/// - Must be present
/// - At least 30 characters once trimmed (backend ids are UUIDs)
/// - Only ASCII letters, digits and `-`
///
/// Every failure is `CorruptReference`, never a generic field error. The id
/// becomes a URL path segment, so `/`, `?`, `#` and `.` are never accepted.
pub fn validate_sku_ref(skuid: Option<&str>) -> ValidationResult<String> {
    let skuid = skuid.map(str::trim).unwrap_or_default();

    if skuid.len() < MIN_SKU_ID_LEN || !skuid.chars().all(is_sku_id_char) {
        return Err(ValidationError::CorruptReference);
    }

    Ok(skuid.to_string())
}

fn is_sku_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Validates an SKU selection for advisory calls.
///
/// A blank selection is `Required`; anything else must pass
/// [`validate_sku_ref`].
pub fn validate_selected_sku(skuid: &str) -> ValidationResult<String> {
    if skuid.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "SKU".to_string(),
        });
    }
    validate_sku_ref(Some(skuid))
}

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an SKU display name (1 to 255 characters).
pub fn validate_sku_name(name: &str) -> ValidationResult<()> {
    validate_text("sku_name", name, MAX_SKU_NAME_LEN)
}

/// Validates a unit of measure (1 to 50 characters).
pub fn validate_unit_of_measure(unit: &str) -> ValidationResult<()> {
    validate_text("unit_of_measure", unit, MAX_UNIT_OF_MEASURE_LEN)
}

/// Validates a free-text scenario for what-if analysis.
pub fn validate_scenario(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "scenario_description".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates and normalizes an Add-SKU payload.
///
/// Name and unit are trimmed; a blank description is dropped.
pub fn validate_new_sku(sku: &NewSku) -> ValidationResult<NewSku> {
    validate_sku_name(&sku.sku_name)?;
    validate_unit_of_measure(&sku.unit_of_measure)?;

    Ok(NewSku {
        sku_name: sku.sku_name.trim().to_string(),
        sku_description: non_blank(sku.sku_description.as_deref()),
        unit_of_measure: sku.unit_of_measure.trim().to_string(),
        initial_stock_level: sku.initial_stock_level,
    })
}

/// Validates an Update-details payload.
///
/// ## Rules
/// - At least one field present
/// - A provided name or unit must be non-empty
pub fn validate_details_update(update: &SkuDetailsUpdate) -> ValidationResult<SkuDetailsUpdate> {
    if update.is_empty() {
        return Err(ValidationError::NothingToUpdate {
            fields: "sku_name, sku_description, unit_of_measure".to_string(),
        });
    }

    if let Some(name) = &update.sku_name {
        validate_sku_name(name)?;
    }
    if let Some(unit) = &update.unit_of_measure {
        validate_unit_of_measure(unit)?;
    }

    Ok(SkuDetailsUpdate {
        sku_name: update.sku_name.as_deref().map(|s| s.trim().to_string()),
        sku_description: update
            .sku_description
            .as_deref()
            .map(|s| s.trim().to_string()),
        unit_of_measure: update
            .unit_of_measure
            .as_deref()
            .map(|s| s.trim().to_string()),
    })
}

/// Parses a stock level typed by the user.
///
/// ## Example
/// ```rust
/// use stockwise_core::validation::parse_stock_level;
///
/// assert_eq!(parse_stock_level("0").unwrap(), 0);
/// assert!(parse_stock_level("-3").is_err());
/// assert!(parse_stock_level("ten").is_err());
/// ```
pub fn parse_stock_level(input: &str) -> ValidationResult<u64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "new_stock_level".to_string(),
        });
    }

    input
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "new_stock_level".to_string(),
            reason: "must be a non-negative whole number".to_string(),
        })
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_sale_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "sale_date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

/// Validates a sale draft against `today` and produces the wire record.
///
/// ## Order of Checks
/// ```text
/// SKU reference ──► quantity > 0 ──► price > 0 ──► date <= today
///  (CorruptReference)   (MustBePositive)           (DateInFuture)
/// ```
pub fn validate_sale(draft: &SaleDraft, today: NaiveDate) -> ValidationResult<SaleRecord> {
    let skuid = validate_sku_ref(draft.skuid.as_deref())?;

    if draft.quantity_sold == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity_sold".to_string(),
        });
    }

    if !draft.selling_price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "selling_price".to_string(),
        });
    }

    if draft.sale_date > today {
        return Err(ValidationError::DateInFuture {
            date: draft.sale_date.format("%Y-%m-%d").to_string(),
        });
    }

    Ok(SaleRecord {
        skuid,
        quantity_sold: draft.quantity_sold,
        selling_price: draft.selling_price,
        sale_date: draft.sale_date,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================
