//! Workshop and master detail payloads.

use serde::{Deserialize, Serialize};

/// A bookable workshop as returned by `GET /api/Workshop/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopDetails {
    /// Server id.
    #[serde(alias = "id")]
    pub workshop_id: String,
    /// Display name.
    pub workshop_name: String,
    /// Start date as sent by the server.
    pub start_date: String,
    /// Venue.
    #[serde(default)]
    pub location: String,
    /// Price of one ticket.
    #[serde(default)]
    pub price: f64,
    /// Seats available in total.
    #[serde(default)]
    pub capacity: u32,
    /// Master hosting the workshop, if any.
    #[serde(default)]
    pub master_id: Option<String>,
}

/// A master (host) as returned by `GET /api/Master/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDetails {
    /// Server id.
    #[serde(alias = "id")]
    pub master_id: String,
    /// Display name.
    #[serde(alias = "masterName")]
    pub name: String,
    /// Biography.
    #[serde(default)]
    pub description: Option<String>,
    /// Portrait.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workshop_accepts_backend_field_names() {
        let payload = serde_json::json!({
            "workshopId": "W1",
            "workshopName": "Tea ceremony",
            "startDate": "2025-03-01T09:00:00",
            "location": "Hanoi",
            "price": 150000.0,
            "capacity": 20,
            "masterId": "M7"
        });
        let workshop: WorkshopDetails = serde_json::from_value(payload).unwrap_or_else(|e| {
            unreachable!("payload should parse: {e}")
        });
        assert_eq!(workshop.workshop_id, "W1");
        assert_eq!(workshop.master_id.as_deref(), Some("M7"));
    }

    #[test]
    fn master_id_is_optional() {
        let payload = serde_json::json!({
            "id": "W2",
            "workshopName": "Calligraphy",
            "startDate": "2025-03-02"
        });
        let workshop: Result<WorkshopDetails, _> = serde_json::from_value(payload);
        assert!(matches!(workshop, Ok(w) if w.master_id.is_none() && w.capacity == 0));
    }
}
