use crate::dataset::{self, Dataset};
use crate::geometry::ShapeStore;
use crate::selection::{AgeGroup, Drug, Selection, Year};

use rustc_hash::FxHashMap;

/// Cache key for one rate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateKey {
    pub state: String,
    pub year: Year,
    pub drug: Drug,
    pub age_group: AgeGroup,
}

impl RateKey {
    pub fn new(state: &str, selection: &Selection) -> Self {
        Self {
            state: state.to_string(),
            year: selection.year.clone(),
            drug: selection.drug,
            age_group: selection.age_group,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }

    /// Position of `rate` within the range, in `[0, 1]`, narrowed for color math.
    /// A degenerate range puts every rate at the midpoint.
    pub fn normalize(&self, rate: f64) -> f32 {
        let span = self.max - self.min;
        if span.abs() <= f64::EPSILON {
            return 0.5;
        }
        ((rate - self.min) / span).clamp(0.0, 1.0) as f32
    }
}

/// Supporting numbers for the info panel. Each is `None` if its cell is missing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total: Option<f64>,
    pub population: Option<f64>,
}

/// Resolves rates from the dataset, memoizing every answer including "no data".
///
/// The dataset never changes at runtime, so the cache is never invalidated.
pub struct RateResolver {
    dataset: Dataset,
    cache: FxHashMap<RateKey, Option<f64>>,
    scans: usize,
}

impl RateResolver {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            cache: FxHashMap::default(),
            scans: 0,
        }
    }

    /// `None` means no data: no row for (state, year), or no usable value in the column.
    pub fn rate(&mut self, state: &str, selection: &Selection) -> Option<f64> {
        let key = RateKey::new(state, selection);
        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        self.scans += 1;
        let rate = self
            .dataset
            .find(state, &selection.year)
            .and_then(|row| Dataset::rate_in(row, selection));

        self.cache.insert(key, rate);
        rate
    }

    /// Min and max over the given states, skipping those without data.
    pub fn range<'a>(
        &mut self,
        states: impl IntoIterator<Item = &'a str>,
        selection: &Selection,
    ) -> Option<RateRange> {
        let mut range: Option<RateRange> = None;

        for state in states {
            let Some(rate) = self.rate(state, selection) else {
                continue;
            };
            range = Some(match range {
                Some(r) => RateRange {
                    min: r.min.min(rate),
                    max: r.max.max(rate),
                },
                None => RateRange {
                    min: rate,
                    max: rate,
                },
            });
        }

        range
    }

    /// Not cached; only the clicked state asks for this.
    pub fn totals(&self, state: &str, selection: &Selection) -> Option<Totals> {
        let row = self.dataset.find(state, &selection.year)?;

        Some(Totals {
            total: row.number(&dataset::totals_column(selection.drug, selection.age_group)),
            population: row.number(&dataset::population_column(selection.age_group)),
        })
    }

    /// How many times the dataset has been scanned for an uncached key.
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

/// Rates and their range for one selection, as the renderer sees them.
#[derive(Debug, Clone, Default)]
pub struct Shading {
    rates: FxHashMap<String, Option<f64>>,
    range: Option<RateRange>,
}

impl Shading {
    pub fn compute(
        resolver: &mut RateResolver,
        shapes: &ShapeStore,
        selection: &Selection,
    ) -> Self {
        let range = resolver.range(shapes.names(), selection);
        let rates = shapes
            .names()
            .map(|state| (state.to_string(), resolver.rate(state, selection)))
            .collect();

        match range {
            Some(r) => log::debug!(
                "Shading {} / {} / {}: {:.2}..{:.2}",
                selection.drug,
                selection.age_group,
                selection.year,
                r.min,
                r.max
            ),
            None => log::warn!(
                "No rates for {} / {} / {}",
                selection.drug,
                selection.age_group,
                selection.year
            ),
        }

        Shading {
            rates,
            range,
        }
    }

    pub fn rate(&self, state: &str) -> Option<f64> {
        self.rates.get(state).copied().flatten()
    }

    pub fn range(&self) -> Option<RateRange> {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use source::DataRow;

    fn resolver() -> RateResolver {
        RateResolver::new(Dataset::new(vec![
            DataRow::new("Texas", "2002")
                .with_field("Rates.Alcohol.Use Past Month.12-17", "9.5")
                .with_field("Totals.Alcohol.Use Past Month.12-17", "180500")
                .with_field("Population.12-17", "1900000"),
            DataRow::new("Ohio", "2002")
                .with_field("Rates.Alcohol.Use Past Month.12-17", "12.25")
                .with_field("Rates.Illicit Drugs.Cocaine Used Past Year.12-17", "1.1"),
            DataRow::new("Utah", "2002").with_field("Rates.Alcohol.Use Past Month.12-17", "4"),
        ]))
    }

    fn alcohol_teens_2002() -> Selection {
        Selection::new(Drug::Alcohol, AgeGroup::Teens, Year::new("2002"))
    }

    #[test]
    fn rate_is_memoized() {
        let mut resolver = resolver();
        let selection = alcohol_teens_2002();

        assert_eq!(resolver.rate("Texas", &selection), Some(9.5));
        assert_eq!(resolver.scan_count(), 1);

        for _ in 0..5 {
            assert_eq!(resolver.rate("Texas", &selection), Some(9.5));
        }
        assert_eq!(resolver.scan_count(), 1);
    }

    #[test]
    fn no_data_is_cached_too() {
        let mut resolver = resolver();
        let selection = alcohol_teens_2002();

        assert_eq!(resolver.rate("Nowhereland", &selection), None);
        assert_eq!(resolver.rate("Nowhereland", &selection), None);
        assert_eq!(resolver.scan_count(), 1);
        assert_eq!(resolver.cached_len(), 1);
    }

    #[test]
    fn missing_column_is_no_data() {
        let mut resolver = resolver();
        let cocaine = Selection::new(Drug::Cocaine, AgeGroup::Teens, Year::new("2002"));

        assert_eq!(resolver.rate("Ohio", &cocaine), Some(1.1));
        assert_eq!(resolver.rate("Texas", &cocaine), None);
    }

    #[test]
    fn keys_do_not_collide_across_selections() {
        let mut resolver = resolver();
        let alcohol = alcohol_teens_2002();
        let cocaine = Selection::new(Drug::Cocaine, AgeGroup::Teens, Year::new("2002"));

        assert_eq!(resolver.rate("Ohio", &alcohol), Some(12.25));
        assert_eq!(resolver.rate("Ohio", &cocaine), Some(1.1));
        assert_eq!(resolver.scan_count(), 2);
    }

    #[test]
    fn range_skips_states_without_data() {
        let mut resolver = resolver();
        let selection = alcohol_teens_2002();

        let range = resolver
            .range(["Texas", "Ohio", "Utah", "Nowhereland"], &selection)
            .unwrap();
        assert_eq!(range, RateRange { min: 4.0, max: 12.25 });

        let empty = Selection::new(Drug::Tobacco, AgeGroup::Adults, Year::new("2002"));
        assert_eq!(resolver.range(["Texas", "Ohio"], &empty), None);
    }

    #[test]
    fn totals_read_uncached_columns() {
        let resolver = resolver();
        let selection = alcohol_teens_2002();

        let totals = resolver.totals("Texas", &selection).unwrap();
        assert_eq!(totals.total, Some(180_500.0));
        assert_eq!(totals.population, Some(1_900_000.0));

        let ohio = resolver.totals("Ohio", &selection).unwrap();
        assert_eq!(ohio, Totals::default());

        let missing_year = Selection::new(Drug::Alcohol, AgeGroup::Teens, Year::new("1999"));
        assert!(resolver.totals("Texas", &missing_year).is_none());
        assert_eq!(resolver.scan_count(), 0);
    }

    #[test]
    fn rates_keep_full_precision() {
        let mut resolver = RateResolver::new(Dataset::new(vec![
            DataRow::new("Iowa", "2002").with_field("Rates.Alcohol.Use Past Month.12-17", "8.115"),
        ]));

        assert_eq!(resolver.rate("Iowa", &alcohol_teens_2002()), Some(8.115));
    }

    #[test]
    fn normalize_handles_degenerate_range() {
        let flat = RateRange { min: 3.0, max: 3.0 };
        assert_eq!(flat.normalize(3.0), 0.5);

        let range = RateRange { min: 2.0, max: 6.0 };
        assert_eq!(range.normalize(2.0), 0.0);
        assert_eq!(range.normalize(4.0), 0.5);
        assert_eq!(range.normalize(6.0), 1.0);
        assert_eq!(range.normalize(10.0), 1.0);
    }
}
