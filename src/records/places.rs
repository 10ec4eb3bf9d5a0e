use crate::core::convert::geometry::Geometry;
use crate::core::convert::uri::Uri;
use crate::{closed_enum, record};

closed_enum! {
    pub enum PlaceType {
        Poi = "poi",
        Neighborhood = "neighborhood",
        City = "city",
        Admin = "admin",
        Country = "country",
    }
}

record! {
    pub struct Place {
        id: String => "id", required;
        url: Option<Uri> => "url";
        place_type: Option<PlaceType> => "place_type";
        name: String => "name";
        full_name: String => "full_name";
        country_code: String => "country_code";
        country: String => "country";
        /// Polygon with one ring, longitude first.
        bounding_box: Option<Geometry> => "bounding_box";
        attributes: Option<PlaceAttributes> => "attributes";
        contained_within: Vec<Place> => "contained_within";
    }
}

record! {
    pub struct PlaceAttributes {
        street_address: String => "street_address";
        locality: String => "locality";
        region: String => "region";
        iso3: String => "iso3";
        postal_code: String => "postal_code";
        phone: String => "phone";
        twitter: String => "twitter";
        url: Option<Uri> => "url";
        app_id: String => "app:id";
    }
}

record! {
    /// Envelope of `geo/search` and `geo/reverse_geocode`.
    pub struct GeoSearch {
        result: Option<GeoResult> => "result", required;
        query: Option<GeoQuery> => "query";
    }
}

record! {
    pub struct GeoResult {
        places: Vec<Place> => "places";
    }
}

record! {
    pub struct GeoQuery {
        url: Option<Uri> => "url";
        kind: String => "type";
        params: Option<GeoQueryParams> => "params";
    }
}

record! {
    pub struct GeoQueryParams {
        accuracy: f64 => "accuracy";
        granularity: Option<PlaceType> => "granularity";
        query: String => "query";
        autocomplete: bool => "autocomplete";
        trim_place: bool => "trim_place";
        coordinates: Option<Geometry> => "coordinates";
    }
}
