use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body of product/detailInfo.
#[derive(Debug, Serialize)]
pub struct ProductDetailRequest<'a> {
    pub skus: Vec<&'a str>,
}

/// Response envelope of product/detailInfo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDetailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<ProductDetail>>,
}

/// One catalog record, as sent by the vendor. Every field is optional and
/// unknown fields are ignored. Numeric and flag fields also accept their
/// string forms ("12.5", "true"); text fields accept bare numbers and flags.
/// Dimensions are kept as exact decimals.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub mpn: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub weight_unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub length_unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub weight: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub length: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub width: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub height: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub weight_kg: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub length_cm: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list_opt")]
    pub characteristics: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list_opt")]
    pub image_urls: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub category_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub combo_flag: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub over_size_flag: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub part_flag: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub upc: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub customized: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub place_of_origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub lithium_battery_contained: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub assembled_length: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub assembled_width: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub assembled_height: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub assembled_weight: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::string_list_opt")]
    pub custom_list: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list_opt")]
    pub associate_product_list: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list_opt")]
    pub certification_list: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list_opt")]
    pub file_urls: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list_opt")]
    pub video_urls: Option<Vec<String>>,
    pub attributes: Option<ProductAttribute>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub white_label: Option<String>,
    pub combo_info: Option<Vec<ProductComboInfo>>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub first_available_date: Option<String>,
    pub seller_info: Option<Value>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub to_be_published: Option<bool>,
    pub un_available_platform: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub main_image_url: Option<String>,
}

impl ProductDetail {
    /// Whether the vendor sent any descriptive content for this SKU.
    pub fn is_populated(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        filled(&self.name)
            || filled(&self.description)
            || filled(&self.category)
            || self.attributes.as_ref().is_some_and(ProductAttribute::is_populated)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProductAttribute {
    #[serde(rename = "Main Color")]
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub main_color: Option<String>,
    #[serde(rename = "Scene")]
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub scene: Option<String>,
    #[serde(rename = "Main Material")]
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub main_material: Option<String>,
}

impl ProductAttribute {
    pub fn is_populated(&self) -> bool {
        self.main_color.is_some() || self.scene.is_some() || self.main_material.is_some()
    }
}

/// Sub-item of a combo product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComboInfo {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub qty: Option<i64>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub length: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub width: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub height: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub weight: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub length_cm: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub width_cm: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub height_cm: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub weight_kg: Option<Decimal>,
}

mod lenient {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn parse_decimal(text: &str) -> Option<Decimal> {
        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }

    pub fn string_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.and_then(scalar_text))
    }

    /// Non-scalar entries are dropped.
    pub fn string_list_opt<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar_text).collect()),
            _ => None,
        })
    }

    pub fn decimal_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => parse_decimal(&n.to_string()),
            Some(Value::String(s)) => parse_decimal(&s),
            _ => None,
        })
    }

    pub fn i64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn bool_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Bool(b)) => Some(b),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(Value::Number(n)) => n.as_i64().map(|i| i != 0),
            _ => None,
        })
    }
}
