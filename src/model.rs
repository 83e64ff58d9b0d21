//! Customer and account records, create drafts, and the account update patch.

use serde::{Deserialize, Deserializer, Serialize};

/// A customer as stored and returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub username: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub city: String,
    pub reference: String,
}

/// A bank account. `type` is a free-form label such as "Livret A".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub number: String,
    pub reference: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

/// Body of `POST /customers`. Every field is optional here; required fields are
/// checked by [`CustomerDraft::validate`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CustomerDraft {
    pub username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub city: Option<String>,
    pub reference: Option<String>,
}

/// Body of `POST /accounts`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccountDraft {
    pub number: Option<String>,
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
}

/// Body of `PUT /accounts/:number`. Absent fields are left untouched.
///
/// `number` and `reference` are captured only so that an attempt to change them
/// can be rejected; they are never applied. Any value counts, `null` included.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccountPatch {
    #[serde(default, deserialize_with = "present")]
    pub number: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "present")]
    pub reference: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
}

/// The mutable part of an [`AccountPatch`], after immutable fields were ruled out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountChanges {
    pub kind: Option<String>,
    pub amount: Option<f64>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.amount.is_none()
    }

    /// Apply present fields to `account` in place.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(kind) = &self.kind {
            account.kind = kind.clone();
        }
        if let Some(amount) = self.amount {
            account.amount = amount;
        }
    }
}

/// `Some` whenever the key is in the payload, even as `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Take a required text field, treating empty strings as missing.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl CustomerDraft {
    /// Returns the customer when firstname, lastname, city and reference are all
    /// present and non-empty. An empty username is stored as no username.
    pub fn validate(self) -> Option<Customer> {
        Some(Customer {
            username: required(self.username),
            firstname: required(self.firstname)?,
            lastname: required(self.lastname)?,
            city: required(self.city)?,
            reference: required(self.reference)?,
        })
    }
}

impl AccountDraft {
    /// Returns the account when number, reference, type and amount are present.
    pub fn validate(self) -> Option<Account> {
        Some(Account {
            number: required(self.number)?,
            reference: required(self.reference)?,
            kind: required(self.kind)?,
            amount: self.amount?,
        })
    }
}

impl AccountPatch {
    /// Name of the first immutable field this patch tries to set, if any.
    pub fn immutable_field(&self) -> Option<&'static str> {
        if self.reference.is_some() {
            Some("reference")
        } else if self.number.is_some() {
            Some("number")
        } else {
            None
        }
    }

    pub fn into_changes(self) -> AccountChanges {
        AccountChanges {
            kind: self.kind,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_customer() -> CustomerDraft {
        CustomerDraft {
            username: Some("jdoe".into()),
            firstname: Some("John".into()),
            lastname: Some("Doe".into()),
            city: Some("Paris".into()),
            reference: Some("JD_1".into()),
        }
    }

    #[test]
    fn customer_draft_with_all_fields_validates() {
        let customer = full_customer().validate().unwrap();
        assert_eq!(customer.reference, "JD_1");
        assert_eq!(customer.username.as_deref(), Some("jdoe"));
    }

    #[test]
    fn customer_draft_missing_any_required_field_fails() {
        let cases: [fn(&mut CustomerDraft); 4] = [
            |d| d.firstname = None,
            |d| d.lastname = Some(String::new()),
            |d| d.city = None,
            |d| d.reference = Some(String::new()),
        ];
        for blank in cases {
            let mut draft = full_customer();
            blank(&mut draft);
            assert!(draft.validate().is_none());
        }
    }

    #[test]
    fn customer_username_is_optional() {
        let mut draft = full_customer();
        draft.username = Some(String::new());
        assert_eq!(draft.validate().unwrap().username, None);
    }

    #[test]
    fn account_draft_treats_empty_strings_as_missing() {
        let draft = AccountDraft {
            number: Some(String::new()),
            reference: Some(String::new()),
            kind: Some("Livret A".into()),
            amount: Some(2000.0),
        };
        assert!(draft.validate().is_none());
    }

    #[test]
    fn account_draft_requires_amount() {
        let draft = AccountDraft {
            number: Some("ACC_4".into()),
            reference: Some("MJ_1".into()),
            kind: Some("Livret A".into()),
            amount: None,
        };
        assert!(draft.validate().is_none());
    }

    #[test]
    fn account_draft_requires_type() {
        for kind in [None, Some(String::new())] {
            let draft = AccountDraft {
                number: Some("ACC_4".into()),
                reference: Some("MJ_1".into()),
                kind,
                amount: Some(2000.0),
            };
            assert!(draft.validate().is_none());
        }
    }

    #[test]
    fn account_draft_requires_number_and_reference_each() {
        let full = AccountDraft {
            number: Some("ACC_4".into()),
            reference: Some("MJ_1".into()),
            kind: Some("Livret A".into()),
            amount: Some(2000.0),
        };
        let mut no_number = full.clone();
        no_number.number = None;
        assert!(no_number.validate().is_none());
        let mut no_reference = full.clone();
        no_reference.reference = Some(String::new());
        assert!(no_reference.validate().is_none());
        assert!(full.validate().is_some());
    }

    #[test]
    fn patch_with_null_immutable_field_is_an_attempt() {
        let patch: AccountPatch =
            serde_json::from_value(serde_json::json!({ "reference": null, "amount": 7 })).unwrap();
        assert_eq!(patch.immutable_field(), Some("reference"));
        let patch: AccountPatch = serde_json::from_value(serde_json::json!({ "number": null })).unwrap();
        assert_eq!(patch.immutable_field(), Some("number"));
        let patch: AccountPatch = serde_json::from_value(serde_json::json!({ "amount": 7 })).unwrap();
        assert_eq!(patch.immutable_field(), None);
    }

    #[test]
    fn account_serializes_kind_as_type() {
        let account = Account {
            number: "ACC_1".into(),
            reference: "JD_1".into(),
            kind: "Livret AB".into(),
            amount: 10.0,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "Livret AB");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn patch_reports_reference_before_number() {
        let patch: AccountPatch =
            serde_json::from_value(serde_json::json!({ "number": "X", "reference": "Y", "amount": 1 })).unwrap();
        assert_eq!(patch.immutable_field(), Some("reference"));
    }

    #[test]
    fn changes_apply_only_present_fields() {
        let mut account = Account {
            number: "ACC_2".into(),
            reference: "RA_2".into(),
            kind: "Compte epargne".into(),
            amount: 10.0,
        };
        AccountChanges { kind: None, amount: Some(1000.0) }.apply_to(&mut account);
        assert_eq!(account.kind, "Compte epargne");
        assert_eq!(account.amount, 1000.0);
    }
}
