use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Decimal places kept by the `DECIMAL(18,2)` price column.
pub const PRICE_SCALE: u32 = 2;

/// Integer digits a price may have. With two decimals this stays within the
/// 15 significant digits an `f64` JSON number holds exactly.
pub const PRICE_INTEGER_DIGITS: u32 = 13;

/// Rejects prices below zero.
pub fn validate_non_negative(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("non_negative").with_message("Price cannot be negative".into()));
    }
    Ok(())
}

/// Rejects prices the catalog cannot store and return unchanged.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(price)?;
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("price_scale")
            .with_message("Price cannot have more than 2 decimal places".into()));
    }
    if price.trunc() >= Decimal::from(10u64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(ValidationError::new("price_limit")
            .with_message("Price must be less than 10000000000000".into()));
    }
    Ok(())
}

fn validate_filter_ranges(filter: &ProductFilter) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
        if min > max {
            return Err(ValidationError::new("price_range")
                .with_message("minPrice must not exceed maxPrice".into()));
        }
    }
    if let (Some(min), Some(max)) = (filter.min_stock, filter.max_stock) {
        if min > max {
            return Err(ValidationError::new("stock_range")
                .with_message("minStock must not exceed maxStock".into()));
        }
    }
    Ok(())
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by the service on creation, never changes afterwards
    pub id: Uuid,
    #[schema(example = "Produto 1")]
    pub name: String,
    #[schema(example = 10)]
    pub stock: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 20.5)]
    pub price: Decimal,
}

impl Product {
    pub fn new(id: Uuid, params: ProductParams) -> Self {
        Self {
            id,
            name: params.name,
            stock: params.stock,
            price: params.price,
        }
    }
}

/// Fields accepted by create and update, read from the query string.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductParams {
    #[validate(length(min = 1, message = "Name is required"))]
    #[param(example = "Produto 1")]
    pub name: String,

    #[param(example = 10)]
    pub stock: i32,

    #[validate(custom(function = "validate_price"))]
    #[param(value_type = f64, example = 20.5)]
    pub price: Decimal,
}

/// Columns a product list may be ordered by. Parsing ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProductSortField {
    Name,
    Stock,
    Price,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OrderQuery {
    /// One of `name`, `stock`, `price` (case-insensitive)
    #[param(example = "price")]
    pub sort_by: String,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-sensitive substring of the product name
    #[param(example = "Produto")]
    pub name: String,
}

/// Optional bounds combined with AND. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
#[validate(schema(function = "validate_filter_ranges"))]
pub struct ProductFilter {
    /// Case-sensitive substring of the product name
    pub name: Option<String>,
    #[validate(custom(function = "validate_non_negative"))]
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative"))]
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    pub min_stock: Option<i32>,
    pub max_stock: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn params(name: &str, price: Decimal) -> ProductParams {
        ProductParams {
            name: name.to_string(),
            stock: 10,
            price,
        }
    }

    #[test]
    fn test_sort_field_parses_case_insensitively() {
        assert_eq!(ProductSortField::from_str("name").unwrap(), ProductSortField::Name);
        assert_eq!(ProductSortField::from_str("STOCK").unwrap(), ProductSortField::Stock);
        assert_eq!(ProductSortField::from_str("Price").unwrap(), ProductSortField::Price);
        assert!(ProductSortField::from_str("colour").is_err());
        assert!(ProductSortField::from_str("").is_err());
    }

    #[test]
    fn test_sort_field_display_round_trips() {
        for field in ProductSortField::iter() {
            assert_eq!(ProductSortField::from_str(&field.to_string()).unwrap(), field);
        }
    }

    #[test]
    fn test_params_accept_zero_price() {
        assert!(params("Produto 1", Decimal::ZERO).validate().is_ok());
        assert!(params("Produto 1", Decimal::new(2050, 2)).validate().is_ok());
    }

    #[test]
    fn test_params_reject_negative_price() {
        let errors = params("Produto 1", Decimal::new(-1, 2)).validate().unwrap_err();
        let field_errors = errors.field_errors();
        let price_errors = field_errors.get("price").unwrap();
        assert_eq!(price_errors[0].code, "non_negative");
        assert_eq!(
            price_errors[0].message.as_deref(),
            Some("Price cannot be negative")
        );
    }

    #[test]
    fn test_params_reject_more_than_two_decimal_places() {
        let errors = params("Produto 1", Decimal::new(1, 3)).validate().unwrap_err();
        assert_eq!(errors.field_errors()["price"][0].code, "price_scale");

        // Trailing zeros do not count
        assert!(params("Produto 1", Decimal::new(2_0500, 4)).validate().is_ok());
    }

    #[test]
    fn test_params_reject_price_beyond_limit() {
        let too_large = Decimal::from_str("12345678901234567.89").unwrap();
        let errors = params("Produto 1", too_large).validate().unwrap_err();
        assert_eq!(errors.field_errors()["price"][0].code, "price_limit");

        let limit = Decimal::from(10_000_000_000_000u64);
        assert!(params("Produto 1", limit).validate().is_err());
        let largest = Decimal::from_str("9999999999999.99").unwrap();
        assert!(params("Produto 1", largest).validate().is_ok());
    }

    #[test]
    fn test_params_reject_empty_name() {
        let errors = params("", Decimal::ONE).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_filter_rejects_inverted_ranges() {
        let filter = ProductFilter {
            min_price: Some(Decimal::from(50)),
            max_price: Some(Decimal::from(10)),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let filter = ProductFilter {
            min_stock: Some(30),
            max_stock: Some(5),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        assert!(ProductFilter::default().validate().is_ok());
    }

    #[test]
    fn test_filter_rejects_negative_price_bounds() {
        let filter = ProductFilter {
            max_price: Some(Decimal::from(-5)),
            ..Default::default()
        };
        let errors = filter.validate().unwrap_err();
        assert!(
            errors
                .field_errors()
                .values()
                .any(|errs| errs.iter().any(|e| e.code == "non_negative"))
        );

        let filter = ProductFilter {
            min_price: Some(Decimal::from(-5)),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_product_serializes_price_as_number() {
        let product = Product::new(Uuid::nil(), params("Produto 1", Decimal::new(2050, 2)));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["name"], "Produto 1");
        assert_eq!(json["stock"], 10);
        assert_eq!(json["price"], 20.5);
    }
}
