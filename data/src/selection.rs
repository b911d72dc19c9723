use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Drug {
    #[default]
    Alcohol,
    Tobacco,
    Cocaine,
    Marijuana,
}

impl Drug {
    pub const ALL: [Drug; 4] = [Drug::Alcohol, Drug::Tobacco, Drug::Cocaine, Drug::Marijuana];

    /// Survey column family for this drug, between the `Rates.`/`Totals.`
    /// prefix and the age group suffix.
    pub fn measure(&self) -> &'static str {
        match self {
            Drug::Cocaine => "Illicit Drugs.Cocaine Used Past Year",
            Drug::Marijuana => "Marijuana.Used Past Month",
            Drug::Alcohol => "Alcohol.Use Past Month",
            Drug::Tobacco => "Tobacco.Use Past Month",
        }
    }
}

impl std::fmt::Display for Drug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Drug::Alcohol => "Alcohol",
                Drug::Tobacco => "Tobacco",
                Drug::Cocaine => "Cocaine",
                Drug::Marijuana => "Marijuana",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgeGroup {
    #[default]
    Teens,
    YoungAdults,
    Adults,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Teens, AgeGroup::YoungAdults, AgeGroup::Adults];

    /// Column suffix, also the label shown in the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Teens => "12-17",
            AgeGroup::YoungAdults => "18-25",
            AgeGroup::Adults => "26+",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Survey year as it appears in the table. Kept as a string so it matches
/// the `Year` column verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Year(pub String);

impl Year {
    pub fn new(year: impl Into<String>) -> Self {
        Self(year.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for Year {
    fn default() -> Self {
        Year::new("2002")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub drug: Drug,
    pub age_group: AgeGroup,
    pub year: Year,
}

impl Selection {
    pub fn new(drug: Drug, age_group: AgeGroup, year: Year) -> Self {
        Self {
            drug,
            age_group,
            year,
        }
    }

    /// Applies a dropdown change. Returns `false` when nothing changed.
    pub fn apply(&mut self, change: SelectionChange) -> bool {
        match change {
            SelectionChange::Drug(drug) if drug != self.drug => self.drug = drug,
            SelectionChange::AgeGroup(age) if age != self.age_group => self.age_group = age,
            SelectionChange::Year(year) if year != self.year => self.year = year,
            _ => return false,
        }
        true
    }
}

/// One dropdown's new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Drug(Drug),
    AgeGroup(AgeGroup),
    Year(Year),
}
