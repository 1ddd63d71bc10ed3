use serde::{Deserialize, Serialize};

use jewelbill_core::{CustomerId, DomainError, DomainResult};

use crate::customer::{names_match, Customer, CustomerDetails};

/// Ordered list of known customers.
///
/// Insertion order is kept; saving details that match an existing customer
/// (same name ignoring case, same phone) updates that entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id_typed() == id)
    }

    /// Insert new details or update the matching customer.
    ///
    /// Returns the stored customer (existing id on update, fresh id on insert).
    pub fn upsert(&mut self, details: CustomerDetails) -> DomainResult<Customer> {
        details.validate()?;

        if let Some(existing) = self
            .customers
            .iter_mut()
            .find(|c| c.details().same_customer_as(&details))
        {
            existing.update_details(details)?;
            return Ok(existing.clone());
        }

        let customer = Customer::register(details)?;
        self.customers.push(customer.clone());
        Ok(customer)
    }

    /// Insert or replace a customer that already carries an id.
    ///
    /// Matches by id first, then by name + phone. Any other entry with the
    /// same id or the same name + phone is dropped, so ids stay unique.
    pub fn put(&mut self, customer: Customer) {
        let id = customer.id_typed();
        let slot = self
            .customers
            .iter()
            .position(|c| c.id_typed() == id)
            .or_else(|| {
                self.customers
                    .iter()
                    .position(|c| c.details().same_customer_as(customer.details()))
            });

        let Some(idx) = slot else {
            self.customers.push(customer);
            return;
        };

        self.customers[idx] = customer;
        let kept = self.customers[idx].clone();
        let mut pos = 0;
        self.customers.retain(|c| {
            let duplicate = pos != idx
                && (c.id_typed() == id || c.details().same_customer_as(kept.details()));
            pos += 1;
            !duplicate
        });
    }

    /// Replace the details of a customer by id.
    ///
    /// Fails with `Conflict` if another customer already has the new name + phone.
    pub fn update(&mut self, id: CustomerId, details: CustomerDetails) -> DomainResult<&Customer> {
        if self
            .customers
            .iter()
            .any(|c| c.id_typed() != id && c.details().same_customer_as(&details))
        {
            return Err(DomainError::conflict(format!(
                "customer '{}' with phone '{}' already exists",
                details.name, details.phone
            )));
        }

        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id_typed() == id)
            .ok_or_else(DomainError::not_found)?;
        customer.update_details(details)?;
        Ok(customer)
    }

    /// Remove a customer by id, returning it.
    pub fn remove(&mut self, id: CustomerId) -> DomainResult<Customer> {
        let idx = self
            .customers
            .iter()
            .position(|c| c.id_typed() == id)
            .ok_or_else(DomainError::not_found)?;
        Ok(self.customers.remove(idx))
    }

    /// First customer whose name equals `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Customer> {
        if name.trim().is_empty() {
            return None;
        }
        self.customers.iter().find(|c| names_match(c.name(), name))
    }

    /// Customers whose name or phone contains `term` (case-insensitive).
    pub fn search(&self, term: &str) -> Vec<&Customer> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.customers.iter().collect();
        }
        self.customers
            .iter()
            .filter(|c| c.name().to_lowercase().contains(&needle) || c.phone().contains(&needle))
            .collect()
    }
}

impl FromIterator<Customer> for CustomerDirectory {
    fn from_iter<T: IntoIterator<Item = Customer>>(iter: T) -> Self {
        let mut directory = Self::new();
        for customer in iter {
            directory.put(customer);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asha() -> CustomerDetails {
        CustomerDetails::named("Asha Verma").with_phone("9810000001")
    }

    #[test]
    fn upsert_appends_new_customers_in_order() {
        let mut dir = CustomerDirectory::new();
        dir.upsert(asha()).unwrap();
        dir.upsert(CustomerDetails::named("Ravi Kumar")).unwrap();

        let names: Vec<_> = dir.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["Asha Verma", "Ravi Kumar"]);
    }

    #[test]
    fn upsert_updates_matching_customer_in_place() {
        let mut dir = CustomerDirectory::new();
        let first = dir.upsert(asha()).unwrap();
        dir.upsert(CustomerDetails::named("Ravi Kumar")).unwrap();

        let updated = dir
            .upsert(
                CustomerDetails::named("ASHA VERMA")
                    .with_phone("9810000001")
                    .with_address("Chandni Chowk"),
            )
            .unwrap();

        assert_eq!(updated.id_typed(), first.id_typed());
        assert_eq!(dir.len(), 2);
        let stored = dir.iter().next().unwrap();
        assert_eq!(stored.details().address, "Chandni Chowk");
        assert_eq!(stored.name(), "ASHA VERMA");
    }

    #[test]
    fn same_name_different_phone_is_a_new_customer() {
        let mut dir = CustomerDirectory::new();
        dir.upsert(asha()).unwrap();
        dir.upsert(CustomerDetails::named("Asha Verma").with_phone("9810000002"))
            .unwrap();
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        let mut dir = CustomerDirectory::new();
        dir.upsert(asha()).unwrap();

        assert!(dir.find_by_name("asha verma").is_some());
        assert!(dir.find_by_name("asha").is_none());
        assert!(dir.find_by_name("").is_none());
    }

    #[test]
    fn remove_unknown_customer_is_not_found() {
        let mut dir = CustomerDirectory::new();
        assert_eq!(dir.remove(CustomerId::new()).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn update_by_id_validates_name() {
        let mut dir = CustomerDirectory::new();
        let c = dir.upsert(asha()).unwrap();

        let err = dir
            .update(c.id_typed(), CustomerDetails::named(""))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(dir.get(c.id_typed()).unwrap().name(), "Asha Verma");
    }

    #[test]
    fn put_keeps_ids_unique_when_id_and_details_match_different_entries() {
        let mut dir = CustomerDirectory::new();
        let asha = dir.upsert(CustomerDetails::named("Asha").with_phone("1")).unwrap();
        let ravi = dir.upsert(CustomerDetails::named("Ravi").with_phone("2")).unwrap();

        let renamed =
            Customer::with_id(ravi.id_typed(), CustomerDetails::named("asha").with_phone("1")).unwrap();
        dir.put(renamed);

        assert_eq!(dir.len(), 1);
        assert!(dir.get(asha.id_typed()).is_none());
        assert_eq!(dir.get(ravi.id_typed()).unwrap().name(), "asha");

        dir.remove(ravi.id_typed()).unwrap();
        assert!(dir.is_empty());
    }

    #[test]
    fn put_matches_by_details_when_id_is_new() {
        let mut dir = CustomerDirectory::new();
        dir.upsert(asha()).unwrap();
        dir.upsert(CustomerDetails::named("Ravi Kumar")).unwrap();

        let remote_copy = Customer::with_id(CustomerId::new(), asha().with_address("Lajpat Nagar")).unwrap();
        dir.put(remote_copy.clone());

        assert_eq!(dir.len(), 2);
        assert_eq!(dir.iter().next().unwrap(), &remote_copy);
    }

    #[test]
    fn update_into_another_customers_details_conflicts() {
        let mut dir = CustomerDirectory::new();
        dir.upsert(asha()).unwrap();
        let ravi = dir.upsert(CustomerDetails::named("Ravi Kumar")).unwrap();

        let err = dir.update(ravi.id_typed(), asha()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(dir.get(ravi.id_typed()).unwrap().name(), "Ravi Kumar");
    }

    #[test]
    fn search_matches_name_fragment_or_phone() {
        let mut dir = CustomerDirectory::new();
        dir.upsert(asha()).unwrap();
        dir.upsert(CustomerDetails::named("Ravi Kumar").with_phone("9999912345"))
            .unwrap();

        assert_eq!(dir.search("verm").len(), 1);
        assert_eq!(dir.search("12345").len(), 1);
        assert_eq!(dir.search("").len(), 2);
    }
}
