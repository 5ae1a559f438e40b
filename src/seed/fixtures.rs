//! Hard-coded sample rows loaded by the seeder.

use crate::models::{Customer, Invoice, InvoiceStatus, Revenue};
use chrono::NaiveDate;
use uuid::{Uuid, uuid};

/// User fixture with its plaintext password; hashed before insert.
#[derive(Debug, Clone)]
pub struct FixtureUser {
    pub id: Uuid,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

const USERS: [FixtureUser; 1] = [FixtureUser {
    id: uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
    name: "User",
    email: "user@nextmail.com",
    password: "123456",
}];

const CUSTOMERS: [(Uuid, &str, &str, &str); 6] = [
    (
        uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa"),
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a"),
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a"),
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2"),
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9"),
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb"),
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

// (customer index, amount in cents, status, yyyy, mm, dd)
const INVOICES: [(usize, i32, InvoiceStatus, i32, u32, u32); 13] = [
    (0, 15795, InvoiceStatus::Pending, 2022, 12, 6),
    (1, 20348, InvoiceStatus::Pending, 2022, 11, 14),
    (4, 3040, InvoiceStatus::Paid, 2022, 10, 29),
    (3, 44800, InvoiceStatus::Paid, 2023, 9, 10),
    (5, 34577, InvoiceStatus::Pending, 2023, 8, 5),
    (2, 54246, InvoiceStatus::Pending, 2023, 7, 16),
    (0, 666, InvoiceStatus::Pending, 2023, 6, 27),
    (3, 32545, InvoiceStatus::Paid, 2023, 6, 9),
    (4, 1250, InvoiceStatus::Paid, 2023, 6, 17),
    (5, 8546, InvoiceStatus::Paid, 2023, 6, 7),
    (1, 500, InvoiceStatus::Paid, 2023, 8, 19),
    (5, 8945, InvoiceStatus::Paid, 2023, 6, 3),
    (2, 1000, InvoiceStatus::Paid, 2022, 6, 5),
];

const REVENUE: [(&str, i32); 12] = [
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

#[must_use]
pub fn users() -> Vec<FixtureUser> {
    USERS.to_vec()
}

#[must_use]
pub fn customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|(id, name, email, image_url)| Customer {
            id: *id,
            name: (*name).to_string(),
            email: (*email).to_string(),
            image_url: (*image_url).to_string(),
        })
        .collect()
}

/// Invoice fixtures. Dates that fail to build are skipped, which cannot
/// happen for the table above.
#[must_use]
pub fn invoices() -> Vec<Invoice> {
    INVOICES
        .iter()
        .filter_map(|&(customer, amount, status, year, month, day)| {
            Some(Invoice {
                customer_id: CUSTOMERS.get(customer)?.0,
                amount,
                status,
                date: NaiveDate::from_ymd_opt(year, month, day)?,
            })
        })
        .collect()
}

#[must_use]
pub fn revenue() -> Vec<Revenue> {
    REVENUE
        .iter()
        .map(|(month, revenue)| Revenue {
            month: (*month).to_string(),
            revenue: *revenue,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_invoice_references_a_customer() {
        let ids: HashSet<Uuid> = customers().into_iter().map(|c| c.id).collect();
        let invoices = invoices();
        assert_eq!(invoices.len(), INVOICES.len());
        assert!(invoices.iter().all(|i| ids.contains(&i.customer_id)));
    }

    #[test]
    fn revenue_months_are_unique_and_short() {
        let rows = revenue();
        let months: HashSet<&str> = rows.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months.len(), 12);
        assert!(rows.iter().all(|r| r.month.len() <= 4));
    }

    #[test]
    fn user_fixtures_have_unique_emails_and_valid_passwords() {
        let users = users();
        let emails: HashSet<&str> = users.iter().map(|u| u.email).collect();
        assert_eq!(emails.len(), users.len());
        assert!(users.iter().all(|u| u.password.chars().count() >= 6));
    }
}
