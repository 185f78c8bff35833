use super::{CatalogEntity, SearchField};
use crate::types::Resource;
use chrono::NaiveDate;
use serde::Serialize;

/// A film. The upstream serves films in the flat shape only.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub uid: Option<String>,
    pub internal_id: Option<String>,
    pub title: Option<String>,
    pub episode_id: Option<i32>,
    pub opening_crawl: Option<String>,
    pub director: Option<String>,
    pub producer: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub uid: Option<String>,
    pub internal_id: Option<String>,
    pub name: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub homeworld: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Starship {
    pub uid: Option<String>,
    pub internal_id: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub cost_in_credits: Option<String>,
    pub length: Option<String>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub cargo_capacity: Option<String>,
    pub starship_class: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub uid: Option<String>,
    pub internal_id: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub cost_in_credits: Option<String>,
    pub length: Option<String>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub cargo_capacity: Option<String>,
    pub vehicle_class: Option<String>,
    pub url: Option<String>,
}

impl CatalogEntity for Film {
    const RESOURCE: Resource = Resource::Films;
    const NATIVE_PAGINATION: bool = false;
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField::Title];
    const SCAN_FIELD: SearchField = SearchField::Title;

    fn search_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Title => self.title.as_deref(),
            SearchField::Name | SearchField::Model => None,
        }
    }
}

impl CatalogEntity for Person {
    const RESOURCE: Resource = Resource::People;
    const NATIVE_PAGINATION: bool = true;
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField::Name];
    const SCAN_FIELD: SearchField = SearchField::Name;

    fn search_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => self.name.as_deref(),
            SearchField::Title | SearchField::Model => None,
        }
    }
}

impl CatalogEntity for Starship {
    const RESOURCE: Resource = Resource::Starships;
    const NATIVE_PAGINATION: bool = true;
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField::Name, SearchField::Model];
    const SCAN_FIELD: SearchField = SearchField::Name;

    fn search_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => self.name.as_deref(),
            SearchField::Model => self.model.as_deref(),
            SearchField::Title => None,
        }
    }
}

impl CatalogEntity for Vehicle {
    const RESOURCE: Resource = Resource::Vehicles;
    const NATIVE_PAGINATION: bool = true;
    const SEARCH_FIELDS: &'static [SearchField] = &[SearchField::Name, SearchField::Model];
    const SCAN_FIELD: SearchField = SearchField::Name;

    fn search_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => self.name.as_deref(),
            SearchField::Model => self.model.as_deref(),
            SearchField::Title => None,
        }
    }
}
