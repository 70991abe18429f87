use crate::domain::model::City;
use std::collections::HashMap;

/// Collapses cities sharing a slug into the first one seen, summing
/// `saunaCount`. Returns the unique cities in first-seen order and the
/// number of rows merged away.
pub fn merge_duplicate_cities(cities: Vec<City>) -> (Vec<City>, usize) {
    let mut unique: Vec<City> = Vec::with_capacity(cities.len());
    let mut index_by_slug: HashMap<String, usize> = HashMap::new();
    let mut merged = 0;

    for city in cities {
        match index_by_slug.get(&city.slug) {
            Some(&index) => {
                unique[index].sauna_count += city.sauna_count;
                merged += 1;
                tracing::info!("Merged duplicate city: {} ({})", city.name, city.slug);
            }
            None => {
                index_by_slug.insert(city.slug.clone(), unique.len());
                unique.push(city);
            }
        }
    }

    (unique, merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str, slug: &str, count: u64) -> City {
        City {
            name: name.to_string(),
            slug: slug.to_string(),
            province: "Alberta".to_string(),
            province_slug: "alberta".to_string(),
            sauna_count: count,
        }
    }

    #[test]
    fn test_same_slug_cities_are_merged() {
        let cities = vec![
            city("Banff", "banff", 2),
            city("Calgary", "calgary", 4),
            city("Banff ", "banff", 3),
        ];

        let (unique, merged) = merge_duplicate_cities(cities);

        assert_eq!(merged, 1);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Banff");
        assert_eq!(unique[0].sauna_count, 5);
        assert_eq!(unique[1].slug, "calgary");
    }

    #[test]
    fn test_distinct_slugs_untouched() {
        let cities = vec![city("Banff", "banff", 1), city("Canmore", "canmore", 1)];
        let (unique, merged) = merge_duplicate_cities(cities.clone());
        assert_eq!(merged, 0);
        assert_eq!(unique, cities);
    }
}
