//! State → city cascade.
//!
//! Changing the state always drops the current city list and city choice, and
//! only the most recently issued city load may install its result. Every
//! `select_state` stamps a fresh generation into the returned [`CityRequest`];
//! a completion whose ticket no longer matches the pending one is superseded.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CatalogError, CityName, OptionValue, RegionCode};

/// Ticket for one in-flight city load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRequest {
    pub generation: u64,
    pub state: RegionCode,
}

/// What happened to a city load result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CityLoad {
    Applied { count: usize },
    Superseded,
    Failed(CatalogError),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegionCascade {
    available_states: Vec<RegionCode>,
    available_cities: Vec<CityName>,
    selected_state: Option<RegionCode>,
    selected_city: Option<CityName>,
    generation: u64,
    pending: Option<CityRequest>,
}

impl RegionCascade {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available_states(&self) -> &[RegionCode] {
        &self.available_states
    }

    pub fn available_cities(&self) -> &[CityName] {
        &self.available_cities
    }

    pub fn selected_state(&self) -> Option<&RegionCode> {
        self.selected_state.as_ref()
    }

    pub fn selected_city(&self) -> Option<&CityName> {
        self.selected_city.as_ref()
    }

    pub fn pending_request(&self) -> Option<&CityRequest> {
        self.pending.as_ref()
    }

    pub fn is_loading_cities(&self) -> bool {
        self.pending.is_some()
    }

    /// Installs the state list. Loaded once per screen.
    pub fn set_states(&mut self, states: Vec<RegionCode>) {
        self.available_states = states;
    }

    /// Moves to `StateSelected(code)` or back to `NoStateSelected`.
    ///
    /// Returns the city load to issue, if any.
    pub fn select_state(&mut self, code: Option<RegionCode>) -> Option<CityRequest> {
        let code = code.and_then(|c| RegionCode::from_option_value(c.as_str()));
        self.generation = self.generation.wrapping_add(1);
        self.available_cities.clear();
        self.selected_city = None;
        self.selected_state = code.clone();

        self.pending = code.map(|state| CityRequest {
            generation: self.generation,
            state,
        });

        debug!(generation = self.generation, state = ?self.selected_state, "state selected");
        self.pending.clone()
    }

    /// Applies a city load result if `request` is still the latest one.
    pub fn apply_cities(
        &mut self,
        request: &CityRequest,
        result: Result<Vec<CityName>, CatalogError>,
    ) -> CityLoad {
        if self.pending.as_ref() != Some(request) {
            debug!(
                generation = request.generation,
                current = self.generation,
                state = %request.state,
                "discarding superseded city list"
            );
            return CityLoad::Superseded;
        }

        self.pending = None;
        match result {
            Ok(cities) => {
                let count = cities.len();
                self.available_cities = cities;
                CityLoad::Applied { count }
            }
            Err(e) => CityLoad::Failed(e),
        }
    }

    /// Sets the city when it is one of the offered options; returns whether the
    /// selection changed. `None` clears the choice.
    pub fn select_city(&mut self, name: Option<CityName>) -> bool {
        match name.and_then(|n| CityName::from_option_value(n.as_str())) {
            None => self.selected_city.take().is_some(),
            Some(name) if self.available_cities.contains(&name) => {
                if self.selected_city.as_ref() == Some(&name) {
                    return false;
                }
                self.selected_city = Some(name);
                true
            }
            Some(name) => {
                debug!(city = %name, "ignoring city outside the current list");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code(s: &str) -> RegionCode {
        RegionCode::new(s)
    }

    fn cities(names: &[&str]) -> Vec<CityName> {
        names.iter().map(|n| CityName::new(*n)).collect()
    }

    #[test]
    fn starts_with_no_state_and_no_cities() {
        let cascade = RegionCascade::new();
        assert!(cascade.selected_state().is_none());
        assert!(cascade.selected_city().is_none());
        assert!(cascade.available_cities().is_empty());
        assert!(!cascade.is_loading_cities());
    }

    #[test]
    fn selecting_a_state_issues_a_city_load() {
        let mut cascade = RegionCascade::new();
        let request = cascade.select_state(Some(code("SP"))).unwrap();

        assert_eq!(request.state, code("SP"));
        assert!(cascade.is_loading_cities());

        let outcome = cascade.apply_cities(&request, Ok(cities(&["Campinas", "Santos"])));
        assert_eq!(outcome, CityLoad::Applied { count: 2 });
        assert_eq!(cascade.available_cities(), cities(&["Campinas", "Santos"]).as_slice());
        assert!(!cascade.is_loading_cities());
    }

    #[test]
    fn changing_state_resets_city_and_list() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();
        cascade.apply_cities(&sp, Ok(cities(&["Campinas"])));
        assert!(cascade.select_city(Some(CityName::new("Campinas"))));

        let rj = cascade.select_state(Some(code("RJ")));
        assert!(rj.is_some());
        assert!(cascade.selected_city().is_none());
        assert!(cascade.available_cities().is_empty());
    }

    #[test]
    fn unset_state_returns_to_initial_shape() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();
        cascade.apply_cities(&sp, Ok(cities(&["Campinas"])));
        cascade.select_city(Some(CityName::new("Campinas")));

        assert!(cascade.select_state(None).is_none());
        assert!(cascade.selected_state().is_none());
        assert!(cascade.selected_city().is_none());
        assert!(cascade.available_cities().is_empty());
        assert!(!cascade.is_loading_cities());
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();
        let rj = cascade.select_state(Some(code("RJ"))).unwrap();

        assert_eq!(cascade.apply_cities(&sp, Ok(cities(&["Campinas"]))), CityLoad::Superseded);
        assert!(cascade.available_cities().is_empty());

        cascade.apply_cities(&rj, Ok(cities(&["Niterói"])));
        assert_eq!(cascade.available_cities(), cities(&["Niterói"]).as_slice());
    }

    #[test]
    fn reselecting_the_same_state_supersedes_the_first_load() {
        let mut cascade = RegionCascade::new();
        let first = cascade.select_state(Some(code("SP"))).unwrap();
        let _rj = cascade.select_state(Some(code("RJ"))).unwrap();
        let last = cascade.select_state(Some(code("SP"))).unwrap();

        assert_ne!(first, last);
        assert_eq!(cascade.apply_cities(&first, Ok(cities(&["Old"]))), CityLoad::Superseded);
        assert_eq!(cascade.apply_cities(&last, Ok(cities(&["Campinas"]))), CityLoad::Applied { count: 1 });
        assert_eq!(cascade.available_cities(), cities(&["Campinas"]).as_slice());
    }

    #[test]
    fn failed_load_leaves_list_empty() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();

        let outcome = cascade.apply_cities(&sp, Err(CatalogError::Status { status: 503 }));
        assert_eq!(outcome, CityLoad::Failed(CatalogError::Status { status: 503 }));
        assert!(cascade.available_cities().is_empty());
        assert!(!cascade.is_loading_cities());
        assert_eq!(cascade.selected_state(), Some(&code("SP")));
    }

    #[test]
    fn city_outside_list_is_a_noop() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();
        cascade.apply_cities(&sp, Ok(cities(&["Campinas"])));
        cascade.select_city(Some(CityName::new("Campinas")));

        assert!(!cascade.select_city(Some(CityName::new("Niterói"))));
        assert_eq!(cascade.selected_city(), Some(&CityName::new("Campinas")));
    }

    #[test]
    fn city_before_list_arrives_is_a_noop() {
        let mut cascade = RegionCascade::new();
        cascade.select_state(Some(code("SP")));

        assert!(!cascade.select_city(Some(CityName::new("Campinas"))));
        assert!(cascade.selected_city().is_none());
    }

    #[test]
    fn older_load_arriving_after_newer_one_is_superseded() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();
        let rj = cascade.select_state(Some(code("RJ"))).unwrap();

        assert_eq!(
            cascade.apply_cities(&rj, Ok(cities(&["Niterói"]))),
            CityLoad::Applied { count: 1 }
        );
        assert_eq!(
            cascade.apply_cities(&sp, Ok(cities(&["Campinas"]))),
            CityLoad::Superseded
        );
        assert_eq!(cascade.available_cities(), cities(&["Niterói"]).as_slice());
        assert_eq!(cascade.selected_state(), Some(&code("RJ")));
    }

    #[test]
    fn placeholder_state_is_unset_and_loads_nothing() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();
        cascade.apply_cities(&sp, Ok(cities(&["Campinas"])));

        assert!(cascade.select_state(Some(code("0"))).is_none());
        assert!(cascade.selected_state().is_none());
        assert!(cascade.available_cities().is_empty());
        assert!(!cascade.is_loading_cities());
    }

    #[test]
    fn placeholder_city_clears_the_choice() {
        let mut cascade = RegionCascade::new();
        let sp = cascade.select_state(Some(code("SP"))).unwrap();
        cascade.apply_cities(&sp, Ok(cities(&["Campinas"])));
        cascade.select_city(Some(CityName::new("Campinas")));

        assert!(cascade.select_city(Some(CityName::new("0"))));
        assert!(cascade.selected_city().is_none());
    }

    proptest! {
        #[test]
        fn only_the_last_selected_state_installs_cities(
            (picks, order) in proptest::collection::vec(0usize..4, 1..12).prop_flat_map(|picks| {
                let order: Vec<usize> = (0..picks.len()).collect();
                (Just(picks), Just(order).prop_shuffle())
            }),
        ) {
            let states = ["SP", "RJ", "MG", "BA"];
            let mut cascade = RegionCascade::new();
            let mut tickets = Vec::new();
            for i in &picks {
                tickets.extend(cascade.select_state(Some(code(states[*i]))));
            }
            prop_assert_eq!(tickets.len(), picks.len());

            // Loads complete in any order, each answering with its own state.
            for &i in &order {
                let ticket = &tickets[i];
                let list = vec![CityName::new(format!("{}-{}", ticket.state, ticket.generation))];
                cascade.apply_cities(ticket, Ok(list));
            }

            let last = tickets.last().unwrap();
            prop_assert_eq!(cascade.selected_state(), Some(&last.state));
            prop_assert!(!cascade.is_loading_cities());
            prop_assert_eq!(
                cascade.available_cities().to_vec(),
                vec![CityName::new(format!("{}-{}", last.state, last.generation))]
            );
        }

        #[test]
        fn unset_state_always_means_no_cities(
            picks in proptest::collection::vec(proptest::option::of(0usize..3), 1..12),
        ) {
            let states = ["SP", "RJ", "MG"];
            let mut cascade = RegionCascade::new();
            for pick in &picks {
                if let Some(ticket) = cascade.select_state(pick.map(|i| code(states[i]))) {
                    cascade.apply_cities(&ticket, Ok(cities(&["X"])));
                }
                if cascade.selected_state().is_none() {
                    prop_assert!(cascade.available_cities().is_empty());
                    prop_assert!(cascade.selected_city().is_none());
                }
            }
        }
    }
}
