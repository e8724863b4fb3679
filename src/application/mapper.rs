//! Entity Mapping
//!
//! Pure conversions between the wire-facing DTOs and the stored entities.
//! Nothing here performs I/O; absent optional fields stay absent.

use crate::application::dto::{
    PersonRequest, PersonResponse, PetRequest, PetResponse, UpdateAddressRequest,
};
use crate::domain::{Person, Pet};

/// Build a new, not yet persisted person from a request.
pub fn to_person(request: PersonRequest) -> Person {
    Person {
        id: None,
        first_name: request.first_name,
        last_name: request.last_name,
        date_of_birth: request.date_of_birth,
        street: request.street,
        house_number: request.house_number,
        house_number_additions: request.house_number_additions,
        postal_code: request.postal_code,
        city: request.city,
        country: request.country,
    }
}

pub fn to_person_response(person: Person) -> PersonResponse {
    PersonResponse {
        id: person.id,
        first_name: person.first_name,
        last_name: person.last_name,
        date_of_birth: person.date_of_birth,
        street: person.street,
        house_number: person.house_number,
        house_number_additions: person.house_number_additions,
        postal_code: person.postal_code,
        city: person.city,
        country: person.country,
    }
}

/// Overwrite the address of an existing person.
///
/// Identity, names and date of birth are left untouched.
pub fn apply_address_update(person: Person, request: UpdateAddressRequest) -> Person {
    Person {
        street: request.street,
        house_number: request.house_number,
        house_number_additions: request.house_number_additions,
        postal_code: request.postal_code,
        city: request.city,
        country: request.country,
        ..person
    }
}

/// Build a new, not yet persisted pet from a request.
pub fn to_pet(request: PetRequest) -> Pet {
    Pet {
        id: None,
        name: request.name,
        age: request.age,
        person_id: request.person_id,
    }
}

/// Overwrite name and age of an existing pet.
///
/// Ownership is never changed by an update, whatever the request carries.
pub fn apply_pet_update(pet: Pet, request: PetRequest) -> Pet {
    Pet {
        name: request.name,
        age: request.age,
        ..pet
    }
}

/// Project a pet onto its response shape. Callers holding an `Option<Pet>`
/// map over it, so an absent pet stays absent.
pub fn to_pet_response(pet: Pet) -> PetResponse {
    PetResponse {
        id: pet.id,
        name: pet.name,
        age: pet.age,
        person_id: pet.person_id,
    }
}
