use crate::domain::model::{Sauna, SheetRow};
use crate::domain::services::slug::to_slug;
use serde_json::Value;

pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "city", "province", "country"];

const TEXT_COLUMNS: [&str; 7] = [
    "street",
    "postalCode",
    "phone",
    "website",
    "email",
    "description",
    "placeId",
];

/// Spreadsheet truthiness: empty strings, zero, `false` and null count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cell text for `column`, or `None` when the cell is absent or falsy.
pub fn cell_text(row: &SheetRow, column: &str) -> Option<String> {
    row.get(column).filter(|v| is_truthy(v)).map(value_text)
}

pub fn has_required_fields(row: &SheetRow) -> bool {
    REQUIRED_COLUMNS
        .iter()
        .all(|column| row.get(column).is_some_and(is_truthy))
}

/// Splits rows into those carrying every required column and a count of the rest.
pub fn filter_valid_rows(rows: Vec<SheetRow>) -> (Vec<SheetRow>, usize) {
    let total = rows.len();
    let valid: Vec<SheetRow> = rows.into_iter().filter(has_required_fields).collect();
    let dropped = total - valid.len();
    (valid, dropped)
}

pub fn parse_float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Integer parse that truncates fractional input (`"12.7"` gives 12).
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Flattens an `images` cell into a list, dropping empty entries. A text
/// cell is one image.
pub fn parse_images(value: &Value) -> Vec<String> {
    let mut images = Vec::new();
    collect_images(value, &mut images);
    images
}

fn collect_images(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_images(item, out);
            }
        }
        Value::String(s) if !s.is_empty() => out.push(s.clone()),
        other if is_truthy(other) => out.push(value_text(other)),
        _ => {}
    }
}

fn numeric<T>(
    row: &SheetRow,
    column: &str,
    name: &str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = row.get(column).filter(|v| is_truthy(v))?;
    let parsed = parse(value);
    if parsed.is_none() {
        tracing::warn!(
            "Ignoring non-numeric {} value {} for sauna '{}'",
            column,
            value,
            name
        );
    }
    parsed
}

/// Maps a row that passed [`has_required_fields`] to a sauna record.
pub fn row_to_sauna(row: &SheetRow) -> Sauna {
    let name = cell_text(row, "name").unwrap_or_default();
    let city = cell_text(row, "city").unwrap_or_default();
    let province = cell_text(row, "province").unwrap_or_default();
    let country = cell_text(row, "country").unwrap_or_default();

    let [street, postal_code, phone, website, email, description, place_id] =
        TEXT_COLUMNS.map(|column| cell_text(row, column));

    let images = row
        .get("images")
        .filter(|v| is_truthy(v))
        .map(parse_images)
        .filter(|images| !images.is_empty());

    Sauna {
        city_slug: to_slug(&city),
        province_slug: to_slug(&province),
        latitude: numeric(row, "latitude", &name, parse_float),
        longitude: numeric(row, "longitude", &name, parse_float),
        rating: numeric(row, "rating", &name, parse_float),
        review_count: numeric(row, "reviewCount", &name, parse_int),
        street,
        postal_code,
        phone,
        website,
        email,
        description,
        images,
        place_id,
        name,
        city,
        province,
        country,
    }
}
