use proptest::prelude::*;
use proptest::sample::select;
use rst_logistics_api::{
    models::{reference_code, CodeSeries, ContainerStatus},
    services::movement_history::{
        parse_event_date, resolve_placement, JobRoute, Placement, PlacementOverrides,
    },
};
use strum::IntoEnumIterator;

fn any_status() -> impl Strategy<Value = ContainerStatus> {
    select(ContainerStatus::all().collect::<Vec<_>>())
}

fn any_series() -> impl Strategy<Value = CodeSeries> {
    select(CodeSeries::iter().collect::<Vec<_>>())
}

fn any_placement() -> impl Strategy<Value = Placement> {
    (proptest::option::of(1i32..500), proptest::option::of(1i32..500)).prop_map(
        |(port_id, address_book_id)| Placement {
            port_id,
            address_book_id,
        },
    )
}

fn route() -> JobRoute {
    JobRoute {
        job_number: "RST/SHP/00042".into(),
        pol_port_id: Some(10),
        pod_port_id: Some(20),
        carrier_address_book_id: Some(30),
        empty_return_depot_address_book_id: Some(40),
    }
}

proptest! {
    #[test]
    fn every_status_eventually_becomes_available(start in any_status()) {
        let mut current = start;
        for _ in 0..ContainerStatus::all().count() {
            if current == ContainerStatus::Available {
                break;
            }
            current = current.allowed_next()[0];
        }
        prop_assert_eq!(current, ContainerStatus::Available);
    }

    #[test]
    fn parsing_ignores_case_and_padding(status in any_status(), pad in 0usize..3, lower in any::<bool>()) {
        let spelled = if lower {
            status.as_str().to_lowercase()
        } else {
            status.as_str().to_string()
        };
        let raw = format!("{}{}{}", " ".repeat(pad), spelled, " ".repeat(pad));
        prop_assert_eq!(ContainerStatus::parse(&raw), Some(status));
    }

    #[test]
    fn allotment_is_never_a_successor(status in any_status()) {
        prop_assert!(!status.can_transition_to(ContainerStatus::Allotted));
    }

    #[test]
    fn idle_targets_keep_placement(previous in any_placement(), unavailable in any::<bool>()) {
        let target = if unavailable {
            ContainerStatus::Unavailable
        } else {
            ContainerStatus::Available
        };
        let placed = resolve_placement(target, previous, None, &PlacementOverrides::default());
        prop_assert_eq!(placed.ok(), Some(previous));
    }

    #[test]
    fn job_targets_ignore_previous_placement(previous in any_placement(), status in any_status()) {
        prop_assume!(!status.is_idle() && status != ContainerStatus::EmptyPickedUp);
        let route = route();
        let from_any = resolve_placement(status, previous, Some(&route), &PlacementOverrides::default());
        let from_empty = resolve_placement(status, Placement::default(), Some(&route), &PlacementOverrides::default());
        prop_assert_eq!(from_any.ok(), from_empty.ok());
    }

    #[test]
    fn plain_dates_are_midnight_utc(y in 2000i32..2100, m in 1u32..=12, d in 1u32..=28) {
        let raw = format!("{y:04}-{m:02}-{d:02}");
        let parsed = parse_event_date(&raw);
        prop_assert!(parsed.is_ok());
        if let Ok(at) = parsed {
            prop_assert_eq!(at.format("%Y-%m-%dT%H:%M:%S").to_string(), format!("{raw}T00:00:00"));
        }
    }

    #[test]
    fn codes_from_foreign_series_do_not_advance(series in any_series(), other in any_series(), n in 1u32..99_999) {
        prop_assume!(series != other);
        let foreign = other.format(n);
        let next = reference_code::next_code(series.prefix(), [foreign.as_str()]);
        prop_assert_eq!(next, series.format(1));
    }
}
