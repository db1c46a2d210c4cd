use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::value_objects::{Email, PhoneNumber};

// ============================================================================
// Customer Records
// ============================================================================

/// Payload accepted by the create operation.
///
/// Only a JSON object is accepted. All three fields must be present and be
/// strings; their contents are not inspected. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
    pub phone: PhoneNumber,
}

impl NewCustomer {
    #[cfg(test)]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: Email::new(email),
            phone: PhoneNumber::new(phone),
        }
    }

    /// Attach the identifier assigned by the store.
    pub fn into_customer(self, id: Uuid) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

// Hand-written so that positional (array) bodies are rejected.
impl<'de> Deserialize<'de> for NewCustomer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NewCustomerVisitor)
    }
}

struct NewCustomerVisitor;

impl<'de> Visitor<'de> for NewCustomerVisitor {
    type Value = NewCustomer;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a customer object with name, email and phone")
    }

    fn visit_map<A>(self, mut map: A) -> Result<NewCustomer, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut name: Option<String> = None;
        let mut email: Option<Email> = None;
        let mut phone: Option<PhoneNumber> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(de::Error::duplicate_field("name"));
                    }
                    name = Some(map.next_value()?);
                }
                "email" => {
                    if email.is_some() {
                        return Err(de::Error::duplicate_field("email"));
                    }
                    email = Some(map.next_value()?);
                }
                "phone" => {
                    if phone.is_some() {
                        return Err(de::Error::duplicate_field("phone"));
                    }
                    phone = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(NewCustomer {
            name: name.ok_or_else(|| de::Error::missing_field("name"))?,
            email: email.ok_or_else(|| de::Error::missing_field("email"))?,
            phone: phone.ok_or_else(|| de::Error::missing_field("phone"))?,
        })
    }
}

/// A persisted customer. The id is assigned once by the store and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub phone: PhoneNumber,
}
