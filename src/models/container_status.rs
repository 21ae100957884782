use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;

/// Lifecycle state of a tank container as recorded in the movement ledger.
///
/// ```text
/// ALLOTTED -> EMPTY PICKED UP -> GATE-IN -> SOB -> GATE-OUT -> EMPTY RETURNED
/// EMPTY RETURNED -> AVAILABLE | UNAVAILABLE
/// AVAILABLE <-> UNAVAILABLE
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum ContainerStatus {
    /// `ALLOTED` is a legacy spelling still found in older rows and clients.
    #[serde(rename = "ALLOTTED", alias = "ALLOTED")]
    #[strum(to_string = "ALLOTTED", serialize = "ALLOTED")]
    Allotted,
    #[serde(rename = "EMPTY PICKED UP")]
    #[strum(to_string = "EMPTY PICKED UP")]
    EmptyPickedUp,
    #[serde(rename = "GATE-IN")]
    #[strum(to_string = "GATE-IN")]
    GateIn,
    #[serde(rename = "SOB")]
    #[strum(to_string = "SOB")]
    Sob,
    #[serde(rename = "GATE-OUT")]
    #[strum(to_string = "GATE-OUT")]
    GateOut,
    #[serde(rename = "EMPTY RETURNED")]
    #[strum(to_string = "EMPTY RETURNED")]
    EmptyReturned,
    #[serde(rename = "AVAILABLE")]
    #[strum(to_string = "AVAILABLE")]
    Available,
    #[serde(rename = "UNAVAILABLE")]
    #[strum(to_string = "UNAVAILABLE")]
    Unavailable,
}

/// Dashboard grouping of current statuses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Allotted,
    Available,
    Unavailable,
    EmptyReturned,
    InTransit,
}

impl ContainerStatus {
    /// Parses a stored or submitted status, tolerating surrounding whitespace
    /// and case.
    pub fn parse(raw: &str) -> Option<Self> {
        ContainerStatus::from_str(raw.trim()).ok()
    }

    /// Canonical spelling, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::Allotted => "ALLOTTED",
            ContainerStatus::EmptyPickedUp => "EMPTY PICKED UP",
            ContainerStatus::GateIn => "GATE-IN",
            ContainerStatus::Sob => "SOB",
            ContainerStatus::GateOut => "GATE-OUT",
            ContainerStatus::EmptyReturned => "EMPTY RETURNED",
            ContainerStatus::Available => "AVAILABLE",
            ContainerStatus::Unavailable => "UNAVAILABLE",
        }
    }

    pub fn allowed_next(&self) -> &'static [ContainerStatus] {
        use ContainerStatus::*;
        match self {
            Allotted => &[EmptyPickedUp],
            EmptyPickedUp => &[GateIn],
            GateIn => &[Sob],
            Sob => &[GateOut],
            GateOut => &[EmptyReturned],
            EmptyReturned => &[Available, Unavailable],
            Available => &[Unavailable],
            Unavailable => &[Available],
        }
    }

    pub fn can_transition_to(&self, next: ContainerStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    /// Statuses that release the container from its job. Moving into one of
    /// these never consults the job and clears the job linkage.
    pub fn is_idle(&self) -> bool {
        matches!(self, ContainerStatus::Available | ContainerStatus::Unavailable)
    }

    pub fn bucket(&self) -> StatusBucket {
        match self {
            ContainerStatus::Allotted => StatusBucket::Allotted,
            ContainerStatus::Available => StatusBucket::Available,
            ContainerStatus::Unavailable => StatusBucket::Unavailable,
            ContainerStatus::EmptyReturned => StatusBucket::EmptyReturned,
            ContainerStatus::EmptyPickedUp
            | ContainerStatus::GateIn
            | ContainerStatus::Sob
            | ContainerStatus::GateOut => StatusBucket::InTransit,
        }
    }

    pub fn all() -> impl Iterator<Item = ContainerStatus> {
        ContainerStatus::iter()
    }
}

impl StatusBucket {
    /// Buckets a raw ledger value. Anything unparseable lands in `InTransit`.
    pub fn of_raw(raw: &str) -> StatusBucket {
        ContainerStatus::parse(raw)
            .map(|status| status.bucket())
            .unwrap_or(StatusBucket::InTransit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ALLOTTED", ContainerStatus::Allotted)]
    #[case("ALLOTED", ContainerStatus::Allotted)]
    #[case("empty picked up", ContainerStatus::EmptyPickedUp)]
    #[case(" GATE-IN ", ContainerStatus::GateIn)]
    #[case("SOB", ContainerStatus::Sob)]
    #[case("GATE-OUT", ContainerStatus::GateOut)]
    #[case("EMPTY RETURNED", ContainerStatus::EmptyReturned)]
    #[case("AVAILABLE", ContainerStatus::Available)]
    #[case("Unavailable", ContainerStatus::Unavailable)]
    fn parses_known_spellings(#[case] raw: &str, #[case] expected: ContainerStatus) {
        assert_eq!(ContainerStatus::parse(raw), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("IN TRANSIT")]
    #[case("GATEIN")]
    fn rejects_unknown_statuses(#[case] raw: &str) {
        assert_eq!(ContainerStatus::parse(raw), None);
    }

    #[test]
    fn display_uses_canonical_spelling() {
        for status in ContainerStatus::all() {
            assert_eq!(status.to_string(), status.as_str());
            assert_eq!(status.as_ref(), status.as_str());
        }
        assert_eq!(
            ContainerStatus::parse("ALLOTED").map(|s| s.to_string()),
            Some("ALLOTTED".to_string())
        );
    }

    #[test]
    fn serde_accepts_legacy_and_writes_canonical() {
        let parsed: ContainerStatus = serde_json::from_str("\"ALLOTED\"").unwrap();
        assert_eq!(parsed, ContainerStatus::Allotted);
        assert_eq!(
            serde_json::to_string(&ContainerStatus::EmptyPickedUp).unwrap(),
            "\"EMPTY PICKED UP\""
        );
    }

    #[rstest]
    #[case(ContainerStatus::Allotted, ContainerStatus::EmptyPickedUp)]
    #[case(ContainerStatus::EmptyPickedUp, ContainerStatus::GateIn)]
    #[case(ContainerStatus::GateIn, ContainerStatus::Sob)]
    #[case(ContainerStatus::Sob, ContainerStatus::GateOut)]
    #[case(ContainerStatus::GateOut, ContainerStatus::EmptyReturned)]
    #[case(ContainerStatus::EmptyReturned, ContainerStatus::Available)]
    #[case(ContainerStatus::EmptyReturned, ContainerStatus::Unavailable)]
    #[case(ContainerStatus::Available, ContainerStatus::Unavailable)]
    #[case(ContainerStatus::Unavailable, ContainerStatus::Available)]
    fn allows_forward_edges(#[case] from: ContainerStatus, #[case] to: ContainerStatus) {
        assert!(from.can_transition_to(to));
    }

    #[rstest]
    #[case(ContainerStatus::Allotted, ContainerStatus::GateIn)]
    #[case(ContainerStatus::GateIn, ContainerStatus::EmptyPickedUp)]
    #[case(ContainerStatus::Sob, ContainerStatus::Sob)]
    #[case(ContainerStatus::GateOut, ContainerStatus::Available)]
    #[case(ContainerStatus::Available, ContainerStatus::Allotted)]
    #[case(ContainerStatus::Unavailable, ContainerStatus::EmptyReturned)]
    fn rejects_skips_and_back_edges(#[case] from: ContainerStatus, #[case] to: ContainerStatus) {
        assert!(!from.can_transition_to(to));
    }

    #[test]
    fn only_idle_pair_is_mutually_reachable() {
        for a in ContainerStatus::all() {
            for b in ContainerStatus::all() {
                if a != b && a.can_transition_to(b) && b.can_transition_to(a) {
                    assert!(a.is_idle() && b.is_idle(), "{a} <-> {b}");
                }
            }
        }
    }

    #[rstest]
    #[case("ALLOTED", StatusBucket::Allotted)]
    #[case("AVAILABLE", StatusBucket::Available)]
    #[case("UNAVAILABLE", StatusBucket::Unavailable)]
    #[case("EMPTY RETURNED", StatusBucket::EmptyReturned)]
    #[case("SOB", StatusBucket::InTransit)]
    #[case("GATE-OUT", StatusBucket::InTransit)]
    #[case("something else", StatusBucket::InTransit)]
    fn buckets_raw_statuses(#[case] raw: &str, #[case] bucket: StatusBucket) {
        assert_eq!(StatusBucket::of_raw(raw), bucket);
    }
}
