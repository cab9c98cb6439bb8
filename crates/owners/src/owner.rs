use serde::{Deserialize, Serialize};

use petclinic_core::{DomainError, DomainResult, Entity, OwnerId, Person, PetId};

use crate::pet::Pet;
use crate::visit::Visit;

/// Placeholder stored in contact fields until the owner fills them in.
const PLACEHOLDER: &str = " ";

/// A clinic customer owning zero or more pets.
///
/// The owner is the only writer of its pet collection: callers see pets
/// through [`Owner::pets`] and add them through [`Owner::add_pet`].
/// Deserialized owners are rebuilt through [`Owner::from_storage`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredOwner")]
pub struct Owner {
    #[serde(flatten)]
    person: Person,
    address: String,
    city: String,
    telephone: String,
    #[serde(default)]
    pets: Vec<Pet>,
}

/// Serialized form of an owner; missing contact fields get placeholders.
#[derive(Deserialize)]
struct StoredOwner {
    #[serde(flatten)]
    person: Person,
    #[serde(default = "placeholder")]
    address: String,
    #[serde(default = "placeholder")]
    city: String,
    #[serde(default = "placeholder")]
    telephone: String,
    #[serde(default)]
    pets: Vec<Pet>,
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

impl From<StoredOwner> for Owner {
    fn from(stored: StoredOwner) -> Self {
        Owner::from_storage(stored.person, stored.address, stored.city, stored.telephone, stored.pets)
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self::new()
    }
}

impl Owner {
    /// A fresh, unsaved owner with placeholder contact details and no pets.
    pub fn new() -> Self {
        Self {
            person: Person::default(),
            address: placeholder(),
            city: placeholder(),
            telephone: placeholder(),
            pets: Vec::new(),
        }
    }

    /// Rebuild an owner loaded from storage.
    ///
    /// Pets are presented ordered by name, matching the mapping's `order_by`.
    pub fn from_storage(
        person: Person,
        address: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
        mut pets: Vec<Pet>,
    ) -> Self {
        pets.sort_by(|a, b| a.name().cmp(&b.name()));
        Self {
            person,
            address: address.into(),
            city: city.into(),
            telephone: telephone.into(),
            pets,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn set_id(&mut self, id: Option<OwnerId>) {
        self.person.set_id(id);
    }

    pub fn first_name(&self) -> &str {
        self.person.first_name()
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.person.set_first_name(first_name);
    }

    pub fn last_name(&self) -> &str {
        self.person.last_name()
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.person.set_last_name(last_name);
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    pub fn telephone(&self) -> &str {
        &self.telephone
    }

    pub fn set_telephone(&mut self, telephone: impl Into<String>) {
        self.telephone = telephone.into();
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Adds a pet that has not been persisted yet.
    ///
    /// Pets that already have an identity are ignored: they belong to storage
    /// and are brought in through [`Owner::from_storage`].
    pub fn add_pet(&mut self, pet: Pet) {
        if pet.is_new() {
            self.pets.push(pet);
        } else {
            tracing::debug!(
                owner_id = ?self.id(),
                pet_id = ?pet.id(),
                "ignoring already persisted pet"
            );
        }
    }

    /// Finds a pet by name, including unsaved pets.
    pub fn pet_named(&self, name: &str) -> Option<&Pet> {
        self.pet_named_ignoring_new(Some(name), false)
    }

    /// Finds a persisted pet by identifier.
    ///
    /// Unsaved pets never match, not even when asked for `None`.
    pub fn pet(&self, id: impl Into<Option<PetId>>) -> Option<&Pet> {
        let id = id.into();
        self.pets.iter().find(|pet| !pet.is_new() && pet.id() == id)
    }

    /// Finds the first pet whose name matches case-insensitively.
    ///
    /// Both sides go through `str::to_lowercase` (Unicode default casing,
    /// independent of any locale). Pets without a name never match.
    pub fn pet_named_ignoring_new(&self, name: Option<&str>, ignore_new: bool) -> Option<&Pet> {
        let name = name?;
        self.pets.iter().find(|pet| {
            pet.name().is_some_and(|candidate| eq_ignore_case(candidate, name))
                && (!ignore_new || !pet.is_new())
        })
    }

    /// Records a visit against one of this owner's persisted pets.
    pub fn add_visit(&mut self, pet_id: PetId, visit: Visit) -> DomainResult<()> {
        let owner_id = self.id();
        let Some(pet) = self
            .pets
            .iter_mut()
            .find(|pet| !pet.is_new() && pet.id() == Some(pet_id))
        else {
            tracing::warn!(?owner_id, %pet_id, "visit for unknown pet");
            return Err(DomainError::invalid_id(format!("invalid pet identifier: {pet_id}")));
        };

        pet.add_visit(visit);
        Ok(())
    }
}

// Whole-string lowercasing so context-dependent mappings (final sigma) agree.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Entity for Owner {
    type Id = OwnerId;

    fn id(&self) -> Option<OwnerId> {
        self.person.id()
    }
}

// Diagnostics only; pets are left out on purpose.
impl core::fmt::Debug for Owner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Owner")
            .field("id", &self.id())
            .field("new", &self.is_new())
            .field("last_name", &self.last_name())
            .field("first_name", &self.first_name())
            .field("address", &self.address)
            .field("city", &self.city)
            .field("telephone", &self.telephone)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rex() -> Pet {
        Pet::persisted(PetId::new(1), "Rex")
    }

    fn fido() -> Pet {
        Pet::new("Fido")
    }

    /// Owner with a persisted "Rex" (id 1) and an unsaved "Fido".
    fn owner_with_rex_and_fido() -> Owner {
        let mut owner = Owner::from_storage(
            Person::new("George", "Franklin"),
            "110 W. Liberty St.",
            "Madison",
            "6085551023",
            vec![rex()],
        );
        owner.set_id(Some(OwnerId::new(1)));
        owner.add_pet(fido());
        owner
    }

    #[test]
    fn new_owner_has_placeholders_and_no_pets() {
        let owner = Owner::new();
        assert!(owner.is_new());
        assert_eq!(owner.address(), " ");
        assert_eq!(owner.city(), " ");
        assert_eq!(owner.telephone(), " ");
        assert!(owner.pets().is_empty());
    }

    #[test]
    fn setters_round_trip_without_transformation() {
        let mut owner = Owner::new();
        owner.set_address("1 Main St");
        owner.set_city("Springfield");
        owner.set_telephone("5551234567");
        owner.set_first_name("  Homer ");
        owner.set_last_name("Simpson");

        assert_eq!(owner.address(), "1 Main St");
        assert_eq!(owner.city(), "Springfield");
        assert_eq!(owner.telephone(), "5551234567");
        assert_eq!(owner.first_name(), "  Homer ");
        assert_eq!(owner.last_name(), "Simpson");
    }

    #[test]
    fn add_new_pet_grows_collection_and_is_findable() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Leo"));

        assert_eq!(owner.pets().len(), 1);
        assert_eq!(owner.pet_named("Leo").and_then(Pet::name), Some("Leo"));
    }

    #[test]
    fn add_persisted_pet_is_ignored() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::persisted(PetId::new(5), "Basil"));

        assert!(owner.pets().is_empty());
        assert!(owner.pet_named("Basil").is_none());
    }

    #[test]
    fn lookup_by_id_skips_new_pets() {
        let owner = owner_with_rex_and_fido();

        assert_eq!(owner.pet(PetId::new(1)).and_then(Pet::name), Some("Rex"));
        assert!(owner.pet(None::<PetId>).is_none());
        assert!(owner.pet(PetId::new(99)).is_none());
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        let owner = owner_with_rex_and_fido();

        assert_eq!(owner.pet_named_ignoring_new(Some("REX"), true), Some(&rex()));
        assert_eq!(owner.pet_named_ignoring_new(Some("rex"), true), Some(&rex()));
        assert!(owner.pet_named_ignoring_new(Some("Fido"), true).is_none());
        assert_eq!(owner.pet_named_ignoring_new(Some("Fido"), false), Some(&fido()));
        assert_eq!(owner.pet_named("fIDO"), Some(&fido()));
    }

    #[test]
    fn lookup_by_absent_name_finds_nothing() {
        let mut owner = owner_with_rex_and_fido();
        let mut unnamed = Pet::default();
        unnamed.set_name(None);
        owner.add_pet(unnamed);

        assert!(owner.pet_named_ignoring_new(None, false).is_none());
        assert!(owner.pet_named("").is_none());
    }

    #[test]
    fn lookup_folds_non_ascii_names() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Ärger"));

        assert!(owner.pet_named("äRGER").is_some());
    }

    #[test]
    fn lookup_handles_final_sigma() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Οδυσσευς"));

        assert_eq!(owner.pet_named("ΟΔΥΣΣΕΥΣ").and_then(Pet::name), Some("Οδυσσευς"));
        assert_eq!(owner.pet_named("οδυσσευς").and_then(Pet::name), Some("Οδυσσευς"));
    }

    #[test]
    fn deserialized_owner_is_rebuilt_from_storage() {
        let json = r#"{
            "id": 6,
            "first_name": "Jean",
            "last_name": "Coleman",
            "pets": [
                { "id": 7, "name": "Samantha", "birth_date": null, "pet_type": null },
                { "id": 8, "name": "Max", "birth_date": null, "pet_type": null }
            ]
        }"#;
        let owner: Owner = serde_json::from_str(json).unwrap();

        assert_eq!(owner.id(), Some(OwnerId::new(6)));
        assert_eq!(owner.address(), " ");
        assert_eq!(owner.city(), " ");
        assert_eq!(owner.telephone(), " ");
        let names: Vec<_> = owner.pets().iter().filter_map(Pet::name).collect();
        assert_eq!(names, vec!["Max", "Samantha"]);
    }

    #[test]
    fn add_visit_delegates_to_pet() {
        let mut owner = owner_with_rex_and_fido();
        owner
            .add_visit(PetId::new(1), Visit::new("rabies shot"))
            .unwrap();

        let rex = owner.pet(PetId::new(1)).unwrap();
        assert_eq!(rex.visits().len(), 1);
        assert_eq!(rex.visits()[0].description(), "rabies shot");
    }

    #[test]
    fn add_visit_for_unknown_pet_is_rejected() {
        let mut owner = owner_with_rex_and_fido();
        let before = owner.clone();

        let err = owner
            .add_visit(PetId::new(42), Visit::new("checkup"))
            .unwrap_err();

        assert_eq!(err, DomainError::invalid_id("invalid pet identifier: 42"));
        assert_eq!(owner, before);
    }

    #[test]
    fn from_storage_orders_pets_by_name() {
        let owner = Owner::from_storage(
            Person::new("Jean", "Coleman"),
            "105 N. Lake St.",
            "Monona",
            "6085552654",
            vec![
                Pet::persisted(PetId::new(7), "Samantha"),
                Pet::persisted(PetId::new(8), "Max"),
            ],
        );

        let names: Vec<_> = owner.pets().iter().filter_map(Pet::name).collect();
        assert_eq!(names, vec!["Max", "Samantha"]);
    }

    #[test]
    fn debug_lists_fields_in_fixed_order() {
        let owner = owner_with_rex_and_fido();
        let rendered = format!("{owner:?}");

        let order = ["id:", "new:", "last_name:", "first_name:", "address:", "city:", "telephone:"];
        let positions: Vec<usize> = order
            .iter()
            .map(|field| rendered.find(field).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{rendered}");
        assert!(rendered.contains("new: false"));
        assert!(!rendered.contains("Rex"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: persisted pets never change the collection.
            #[test]
            fn persisted_pets_are_never_added(
                ids in proptest::collection::vec(1i32..10_000, 0..20),
                name in "[A-Za-z]{1,12}"
            ) {
                let mut owner = owner_with_rex_and_fido();
                let before = owner.pets().len();
                for id in ids {
                    owner.add_pet(Pet::persisted(PetId::new(id), name.clone()));
                }
                prop_assert_eq!(owner.pets().len(), before);
            }

            /// Property: any ASCII casing of a name finds the same pet.
            #[test]
            fn name_lookup_ignores_ascii_case(
                name in "[A-Za-z]{1,16}",
                upper in proptest::collection::vec(any::<bool>(), 16)
            ) {
                let mut owner = Owner::new();
                owner.add_pet(Pet::new(name.clone()));

                let query: String = name
                    .chars()
                    .zip(upper.iter())
                    .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                    .collect();

                let found = owner.pet_named(&query).and_then(Pet::name);
                prop_assert_eq!(found, Some(name.as_str()));
            }
        }
    }
}
