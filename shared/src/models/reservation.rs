//! Reservation Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::serde_helpers::int_or_string;

/// Stored reservation record
///
/// Wire and storage field names are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    #[serde(deserialize_with = "int_or_string")]
    pub table_number: i64,
    pub client_name: String,
    pub phone_number: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Time of day, `HH:MM` or `HH:MM:SS`
    pub slot_time_start: String,
    pub slot_time_end: String,
}

/// Candidate reservation as submitted by a client
///
/// `table_number` keeps its external representation (number or string);
/// coercion to an integer happens during admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub table_number: Value,
    pub client_name: String,
    pub phone_number: String,
    pub date: String,
    pub slot_time_start: String,
    pub slot_time_end: String,
}

impl ReservationRequest {
    /// Build the record to persist once admission has assigned an id
    pub fn into_reservation(self, id: String, table_number: i64) -> Reservation {
        Reservation {
            id,
            table_number,
            client_name: self.client_name,
            phone_number: self.phone_number,
            date: self.date,
            slot_time_start: self.slot_time_start,
            slot_time_end: self.slot_time_end,
        }
    }
}

/// Response body of a successful admission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreated {
    pub reservation_id: String,
}

/// Response body of the reservation listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationList {
    pub reservations: Vec<Reservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request: ReservationRequest = serde_json::from_str(
            r#"{
                "tableNumber": "5",
                "clientName": "Ana",
                "phoneNumber": "+34 600 000 000",
                "date": "2024-06-01",
                "slotTimeStart": "18:00",
                "slotTimeEnd": "19:00"
            }"#,
        )
        .unwrap();
        assert_eq!(request.table_number, Value::from("5"));
        assert_eq!(request.slot_time_end, "19:00");
    }

    #[test]
    fn test_into_reservation_copies_fields() {
        let request = ReservationRequest {
            table_number: Value::from(5),
            client_name: "Ana".into(),
            phone_number: "123".into(),
            date: "2024-06-01".into(),
            slot_time_start: "18:00".into(),
            slot_time_end: "19:00".into(),
        };
        let reservation = request.into_reservation("r-1".into(), 5);
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["id"], "r-1");
        assert_eq!(json["tableNumber"], 5);
        assert_eq!(json["slotTimeStart"], "18:00");
    }

    #[test]
    fn test_created_body() {
        let body = ReservationCreated {
            reservation_id: "abc".into(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"reservationId":"abc"}"#
        );
    }
}
