use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::record::{Record, SqliteQuery};

/// Top-level keys of a JSON object, lowercased, in the order they were sent.
///
/// Field matching is case-insensitive and a repeated key keeps its last value.
#[derive(Debug, Default)]
pub struct BodyEntries(Vec<(String, Value)>);

impl BodyEntries {
    /// Last value sent under `key` (compared lowercase), decoded as `T`.
    fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, serde_json::Error> {
        match self.0.iter().rposition(|(k, _)| k == key) {
            Some(pos) => {
                let (_, value) = self.0.swap_remove(pos);
                serde_json::from_value(value)
            }
            None => Ok(None),
        }
    }
}

impl<'de> Deserialize<'de> for BodyEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = BodyEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<BodyEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key.to_lowercase(), value));
                }
                Ok(BodyEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Request body for creating or replacing an item. Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(try_from = "BodyEntries")]
pub struct ItemFields {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl TryFrom<BodyEntries> for ItemFields {
    type Error = serde_json::Error;

    fn try_from(mut entries: BodyEntries) -> Result<Self, Self::Error> {
        Ok(Self {
            name: entries.take("name")?,
            price: entries.take("price")?,
        })
    }
}

impl Record for Item {
    type Fields = ItemFields;

    const TABLE: &'static str = "Items";
    const COLUMNS: &'static [&'static str] = &["Name", "Price"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Item {
            id: row.try_get("Id")?,
            name: row.try_get("Name")?,
            price: row.try_get("Price")?,
        })
    }

    fn bind_fields<'q>(fields: ItemFields, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(fields.name).bind(fields.price)
    }
}

/// A shop ("toko"). Serialized with the `nama` / `alamat` keys.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Store {
    pub id: i64,
    #[serde(rename = "nama")]
    pub name: Option<String>,
    #[serde(rename = "alamat")]
    pub address: Option<String>,
}

/// Request body for a store, keyed `nama` / `alamat` in any casing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(try_from = "BodyEntries")]
pub struct StoreFields {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl TryFrom<BodyEntries> for StoreFields {
    type Error = serde_json::Error;

    fn try_from(mut entries: BodyEntries) -> Result<Self, Self::Error> {
        Ok(Self {
            name: entries.take("nama")?,
            address: entries.take("alamat")?,
        })
    }
}

impl Record for Store {
    type Fields = StoreFields;

    const TABLE: &'static str = "Tokos";
    const COLUMNS: &'static [&'static str] = &["Nama", "Alamat"];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Store {
            id: row.try_get("Id")?,
            name: row.try_get("Nama")?,
            address: row.try_get("Alamat")?,
        })
    }

    fn bind_fields<'q>(fields: StoreFields, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(fields.name).bind(fields.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_fields_ignore_id_and_default_to_none() {
        let fields: ItemFields = serde_json::from_value(json!({ "id": 42, "name": "Pen" })).unwrap();
        assert_eq!(
            fields,
            ItemFields {
                name: Some("Pen".to_string()),
                price: None
            }
        );
    }

    #[test]
    fn item_fields_accept_capitalised_keys() {
        let fields: ItemFields =
            serde_json::from_value(json!({ "Name": "Pen", "Price": 1.5 })).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Pen"));
        assert_eq!(fields.price, Some(1.5));
    }

    #[test]
    fn item_fields_match_keys_in_any_casing() {
        let fields: ItemFields =
            serde_json::from_value(json!({ "NAME": "Pen", "pRiCe": 1.5 })).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Pen"));
        assert_eq!(fields.price, Some(1.5));
    }

    #[test]
    fn repeated_key_in_other_casing_keeps_last_value() {
        let fields: ItemFields =
            serde_json::from_str(r#"{"name":"a","Name":"b","PRICE":1,"price":2}"#).unwrap();
        assert_eq!(fields.name.as_deref(), Some("b"));
        assert_eq!(fields.price, Some(2.0));
    }

    #[test]
    fn explicit_null_and_wrong_type() {
        let fields: ItemFields = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(fields, ItemFields::default());

        assert!(serde_json::from_str::<ItemFields>(r#"{"price":"cheap"}"#).is_err());
        assert!(serde_json::from_str::<ItemFields>("[1, 2]").is_err());
    }

    #[test]
    fn store_serializes_with_nama_alamat() {
        let store = Store {
            id: 3,
            name: Some("Toko Maju".to_string()),
            address: None,
        };
        assert_eq!(
            serde_json::to_value(&store).unwrap(),
            json!({ "id": 3, "nama": "Toko Maju", "alamat": null })
        );
    }

    #[test]
    fn store_fields_accept_both_casings() {
        let lower: StoreFields =
            serde_json::from_value(json!({ "nama": "A", "alamat": "Jl. B" })).unwrap();
        let upper: StoreFields =
            serde_json::from_value(json!({ "Nama": "A", "Alamat": "Jl. B" })).unwrap();
        assert_eq!(lower, upper);
    }
}
