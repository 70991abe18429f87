use crate::domain::model::{City, Province, Sauna};
use crate::domain::services::slug::to_slug;
use std::collections::BTreeMap;

#[derive(Default)]
struct ProvinceTally<'a> {
    sauna_count: u64,
    cities: BTreeMap<&'a str, u64>,
}

/// Derives provinces and cities from sauna records.
///
/// Provinces are sorted by name, cities by name within their province.
/// Names are grouped exactly as written; two spellings that share a slug
/// stay separate here and are merged at seed time.
pub fn build_hierarchy(saunas: &[Sauna]) -> (Vec<Province>, Vec<City>) {
    let mut tallies: BTreeMap<&str, ProvinceTally<'_>> = BTreeMap::new();

    for sauna in saunas {
        let tally = tallies.entry(sauna.province.as_str()).or_default();
        tally.sauna_count += 1;
        *tally.cities.entry(sauna.city.as_str()).or_default() += 1;
    }

    let mut provinces = Vec::with_capacity(tallies.len());
    let mut cities = Vec::new();

    for (province_name, tally) in &tallies {
        let province_slug = to_slug(province_name);

        provinces.push(Province {
            name: province_name.to_string(),
            slug: province_slug.clone(),
            city_count: tally.cities.len() as u64,
            sauna_count: tally.sauna_count,
        });

        for (city_name, count) in &tally.cities {
            cities.push(City {
                name: city_name.to_string(),
                slug: to_slug(city_name),
                province: province_name.to_string(),
                province_slug: province_slug.clone(),
                sauna_count: *count,
            });
        }
    }

    (provinces, cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sauna(name: &str, city: &str, province: &str) -> Sauna {
        Sauna {
            name: name.to_string(),
            city: city.to_string(),
            city_slug: to_slug(city),
            province: province.to_string(),
            province_slug: to_slug(province),
            country: "Canada".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_and_ordering() {
        let saunas = vec![
            sauna("A", "Vancouver", "British Columbia"),
            sauna("B", "Calgary", "Alberta"),
            sauna("C", "Victoria", "British Columbia"),
            sauna("D", "Vancouver", "British Columbia"),
            sauna("E", "Banff", "Alberta"),
        ];

        let (provinces, cities) = build_hierarchy(&saunas);

        let names: Vec<_> = provinces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Alberta", "British Columbia"]);
        assert_eq!(provinces[0].city_count, 2);
        assert_eq!(provinces[0].sauna_count, 2);
        assert_eq!(provinces[1].slug, "british-columbia");
        assert_eq!(provinces[1].city_count, 2);
        assert_eq!(provinces[1].sauna_count, 3);

        let cities: Vec<_> = cities
            .iter()
            .map(|c| (c.slug.as_str(), c.province_slug.as_str(), c.sauna_count))
            .collect();
        assert_eq!(
            cities,
            [
                ("banff", "alberta", 1),
                ("calgary", "alberta", 1),
                ("vancouver", "british-columbia", 2),
                ("victoria", "british-columbia", 1),
            ]
        );
    }

    #[test]
    fn test_spelling_variants_stay_separate() {
        let saunas = vec![sauna("A", "Banff", "Alberta"), sauna("B", "Banff ", "Alberta")];

        let (provinces, cities) = build_hierarchy(&saunas);

        assert_eq!(provinces[0].city_count, 2);
        assert_eq!(cities.len(), 2);
        assert!(cities.iter().all(|c| c.slug == "banff"));
    }

    #[test]
    fn test_empty_input() {
        let (provinces, cities) = build_hierarchy(&[]);
        assert!(provinces.is_empty());
        assert!(cities.is_empty());
    }
}
