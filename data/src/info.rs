use crate::rate::{RateResolver, Totals};
use crate::selection::Selection;
use crate::util::format_with_commas;

pub const NO_DATA_TEXT: &str = "No data available for this selection";

/// Text shown below the map for the clicked state.
///
/// A state without a rate keeps its header line; only the body becomes
/// [`NO_DATA_TEXT`] instead of the message standing alone.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoText {
    pub header: String,
    pub body: String,
}

impl InfoText {
    pub fn for_state(resolver: &mut RateResolver, state: &str, selection: &Selection) -> Self {
        let header = format!(
            "{state}: {} use ({}) in {}",
            selection.drug, selection.age_group, selection.year
        );

        let body = match resolver.rate(state, selection) {
            Some(rate) => {
                let totals = resolver.totals(state, selection).unwrap_or_default();
                data_line(rate, totals)
            }
            None => NO_DATA_TEXT.to_string(),
        };

        InfoText { header, body }
    }
}

fn data_line(rate: f64, totals: Totals) -> String {
    let or_na = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), format_with_commas);

    format!(
        "Rate: {rate:.2}%, Total: {}, Population: {}",
        or_na(totals.total),
        or_na(totals.population)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AgeGroup, Dataset, Drug, Year};
    use source::DataRow;

    fn resolver() -> RateResolver {
        RateResolver::new(Dataset::new(vec![
            DataRow::new("Texas", "2002")
                .with_field("Rates.Alcohol.Use Past Month.12-17", "9.5")
                .with_field("Totals.Alcohol.Use Past Month.12-17", "180500")
                .with_field("Population.12-17", "1900000"),
            DataRow::new("Ohio", "2002").with_field("Rates.Alcohol.Use Past Month.12-17", "0"),
            DataRow::new("Iowa", "2002").with_field("Rates.Alcohol.Use Past Month.12-17", "8.115"),
            DataRow::new("Maine", "2002")
                .with_field("Rates.Alcohol.Use Past Month.12-17", "33.335"),
        ]))
    }

    #[test]
    fn full_row_prints_every_number() {
        let selection = Selection::new(Drug::Alcohol, AgeGroup::Teens, Year::new("2002"));
        let info = InfoText::for_state(&mut resolver(), "Texas", &selection);

        assert_eq!(info.header, "Texas: Alcohol use (12-17) in 2002");
        assert_eq!(info.body, "Rate: 9.50%, Total: 180,500, Population: 1,900,000");
    }

    #[test]
    fn zero_rate_is_data_and_missing_totals_are_na() {
        let selection = Selection::new(Drug::Alcohol, AgeGroup::Teens, Year::new("2002"));
        let info = InfoText::for_state(&mut resolver(), "Ohio", &selection);

        assert_eq!(info.body, "Rate: 0.00%, Total: n/a, Population: n/a");
    }

    #[test]
    fn rate_rounds_from_the_parsed_value() {
        let selection = Selection::new(Drug::Alcohol, AgeGroup::Teens, Year::new("2002"));

        let iowa = InfoText::for_state(&mut resolver(), "Iowa", &selection);
        assert!(iowa.body.starts_with("Rate: 8.12%,"), "{}", iowa.body);

        let maine = InfoText::for_state(&mut resolver(), "Maine", &selection);
        assert!(maine.body.starts_with("Rate: 33.34%,"), "{}", maine.body);
    }

    #[test]
    fn no_rate_prints_placeholder() {
        let selection = Selection::new(Drug::Cocaine, AgeGroup::Adults, Year::new("2002"));
        let info = InfoText::for_state(&mut resolver(), "Texas", &selection);

        assert_eq!(info.header, "Texas: Cocaine use (26+) in 2002");
        assert_eq!(info.body, NO_DATA_TEXT);
    }
}
