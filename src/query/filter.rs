//! In-memory filtering and the Record impls for customers and accounts.

use super::criteria::{Criteria, FieldKind, FieldRef, Record};
use crate::model::{Account, Customer};

/// Keep the records matching every term of `criteria`, preserving order.
/// Empty criteria return `records` unchanged.
pub fn filter<R: Record>(records: Vec<R>, criteria: &Criteria) -> Vec<R> {
    if criteria.is_empty() {
        return records;
    }
    records.into_iter().filter(|r| criteria.matches(r)).collect()
}

impl Record for Customer {
    const NAME: &'static str = "customer";
    const FILTERABLE: &'static [(&'static str, FieldKind)] = &[
        ("username", FieldKind::Text),
        ("firstname", FieldKind::Text),
        ("lastname", FieldKind::Text),
        ("city", FieldKind::Text),
        ("reference", FieldKind::Text),
    ];

    fn field(&self, field: &str) -> Option<FieldRef<'_>> {
        Some(match field {
            "username" => FieldRef::Text(self.username.as_deref()?),
            "firstname" => FieldRef::Text(&self.firstname),
            "lastname" => FieldRef::Text(&self.lastname),
            "city" => FieldRef::Text(&self.city),
            "reference" => FieldRef::Text(&self.reference),
            _ => return None,
        })
    }
}

impl Record for Account {
    const NAME: &'static str = "account";
    const FILTERABLE: &'static [(&'static str, FieldKind)] = &[
        ("number", FieldKind::Text),
        ("reference", FieldKind::Text),
        ("type", FieldKind::Text),
        ("amount", FieldKind::Number),
    ];

    fn field(&self, field: &str) -> Option<FieldRef<'_>> {
        Some(match field {
            "number" => FieldRef::Text(&self.number),
            "reference" => FieldRef::Text(&self.reference),
            "type" => FieldRef::Text(&self.kind),
            "amount" => FieldRef::Number(self.amount),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldValue;

    fn account(number: &str, reference: &str, kind: &str) -> Account {
        Account {
            number: number.into(),
            reference: reference.into(),
            kind: kind.into(),
            amount: 100.0,
        }
    }

    fn accounts() -> Vec<Account> {
        vec![
            account("ACC_1", "JD_1", "Livret AB"),
            account("ACC_2", "RA_2", "Compte epargne"),
            account("ACC_3", "RA_3", "Livret AB"),
        ]
    }

    fn numbers(records: &[Account]) -> Vec<&str> {
        records.iter().map(|a| a.number.as_str()).collect()
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.into())
    }

    #[test]
    fn empty_criteria_returns_everything_in_order() {
        let out = filter(accounts(), &Criteria::new());
        assert_eq!(out, accounts());
    }

    #[test]
    fn filters_by_type() {
        let out = filter(accounts(), &Criteria::new().and("type", text("Livret AB")));
        assert_eq!(numbers(&out), vec!["ACC_1", "ACC_3"]);
    }

    #[test]
    fn combined_filters_intersect_instead_of_overwriting() {
        let criteria = Criteria::new()
            .and("type", text("Livret AB"))
            .and("reference", text("JD_1"));
        assert_eq!(numbers(&filter(accounts(), &criteria)), vec!["ACC_1"]);

        // The later term alone would match ACC_2; the earlier one must still hold.
        let criteria = Criteria::new()
            .and("type", text("Livret AB"))
            .and("reference", text("RA_2"));
        assert!(filter(accounts(), &criteria).is_empty());
    }

    #[test]
    fn accented_value_does_not_match() {
        let out = filter(accounts(), &Criteria::new().and("type", text("Compte épargne")));
        assert!(out.is_empty());
    }

    #[test]
    fn adding_a_term_never_grows_the_result() {
        let base = Criteria::new().and("type", text("Livret AB"));
        let narrower = base.clone().and("number", text("ACC_3"));
        let wide = filter(accounts(), &base).len();
        let narrow = filter(accounts(), &narrower).len();
        assert!(narrow <= wide);
        assert_eq!(narrow, 1);
    }

    #[test]
    fn numeric_terms_compare_exactly() {
        let mut rows = accounts();
        rows[1].amount = 5555555.0;
        let out = filter(rows, &Criteria::new().and("amount", FieldValue::Number(5555555.0)));
        assert_eq!(numbers(&out), vec!["ACC_2"]);
    }

    #[test]
    fn customer_without_username_never_matches_username_filter() {
        let customer = Customer {
            username: None,
            firstname: "Jane".into(),
            lastname: "Roe".into(),
            city: "Lyon".into(),
            reference: "JR_1".into(),
        };
        let out = filter(vec![customer], &Criteria::new().and("username", text("")));
        assert!(out.is_empty());
    }
}
