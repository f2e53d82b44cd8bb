//! `fake` crate backed generators.

use super::ExternalGenerator;
use crate::value::Value;
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryCode, CountryName, Latitude, Longitude, StateAbbr, StateName,
    StreetName, ZipCode,
};
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::{CatchPhrase, CompanyName, Industry, Profession};
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::internet::en::{FreeEmail, IPv4, IPv6, MACAddress, SafeEmail, UserAgent, Username};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::{CellNumber, PhoneNumber};
use fake::Fake;
use rand::RngCore;

/// Canonical generator names understood by `FakeRegistry`.
///
/// Aliases (`full_name`, `zip_code`, `ip`, ...) resolve to one of these.
pub const SUPPORTED_GENERATORS: &[&str] = &[
    "name",
    "first_name",
    "last_name",
    "email",
    "free_email",
    "username",
    "phone",
    "cell_phone",
    "street",
    "building_number",
    "city",
    "state",
    "state_abbr",
    "zip",
    "country",
    "country_code",
    "latitude",
    "longitude",
    "company",
    "industry",
    "catch_phrase",
    "profession",
    "job_title",
    "ipv4",
    "ipv6",
    "mac_address",
    "user_agent",
    "credit_card",
    "word",
    "sentence",
    "paragraph",
    "boolean",
];

/// One faker, selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FakeKind {
    Name,
    FirstName,
    LastName,
    Email,
    FreeEmail,
    Username,
    Phone,
    CellPhone,
    Street,
    BuildingNumber,
    City,
    State,
    StateAbbr,
    Zip,
    Country,
    CountryCode,
    Latitude,
    Longitude,
    Company,
    Industry,
    CatchPhrase,
    Profession,
    JobTitle,
    Ipv4,
    Ipv6,
    MacAddress,
    UserAgent,
    CreditCard,
    Word,
    Sentence,
    Paragraph,
    Boolean,
}

impl FakeKind {
    /// Resolve a possibly namespaced name (`name:first_name`,
    /// `internet.safe_email`) by its last segment.
    fn parse(name: &str) -> Option<Self> {
        let key = name
            .rsplit([':', '.'])
            .next()
            .unwrap_or(name)
            .trim()
            .to_lowercase();

        let kind = match key.as_str() {
            "name" | "full_name" => FakeKind::Name,
            "first_name" => FakeKind::FirstName,
            "last_name" => FakeKind::LastName,
            "email" | "safe_email" => FakeKind::Email,
            "free_email" => FakeKind::FreeEmail,
            "username" | "user_name" => FakeKind::Username,
            "phone" | "phone_number" => FakeKind::Phone,
            "cell_phone" | "cell_number" => FakeKind::CellPhone,
            "street" | "street_name" => FakeKind::Street,
            "building_number" => FakeKind::BuildingNumber,
            "city" => FakeKind::City,
            "state" => FakeKind::State,
            "state_abbr" => FakeKind::StateAbbr,
            "zip" | "zip_code" | "postal_code" => FakeKind::Zip,
            "country" => FakeKind::Country,
            "country_code" => FakeKind::CountryCode,
            "latitude" | "lat" => FakeKind::Latitude,
            "longitude" | "lng" | "lon" => FakeKind::Longitude,
            "company" | "company_name" => FakeKind::Company,
            "industry" => FakeKind::Industry,
            "catch_phrase" => FakeKind::CatchPhrase,
            "profession" => FakeKind::Profession,
            "job_title" | "title" => FakeKind::JobTitle,
            "ipv4" | "ip" | "ip_address" => FakeKind::Ipv4,
            "ipv6" => FakeKind::Ipv6,
            "mac_address" | "mac" => FakeKind::MacAddress,
            "user_agent" => FakeKind::UserAgent,
            "credit_card" | "credit_card_number" => FakeKind::CreditCard,
            "word" => FakeKind::Word,
            "sentence" => FakeKind::Sentence,
            "paragraph" | "lorem" => FakeKind::Paragraph,
            "boolean" | "bool" => FakeKind::Boolean,
            _ => return None,
        };
        Some(kind)
    }

    fn produce(self, rng: &mut dyn RngCore) -> Value {
        let text: String = match self {
            FakeKind::Name => Name().fake_with_rng(rng),
            FakeKind::FirstName => FirstName().fake_with_rng(rng),
            FakeKind::LastName => LastName().fake_with_rng(rng),
            FakeKind::Email => SafeEmail().fake_with_rng(rng),
            FakeKind::FreeEmail => FreeEmail().fake_with_rng(rng),
            FakeKind::Username => Username().fake_with_rng(rng),
            FakeKind::Phone => PhoneNumber().fake_with_rng(rng),
            FakeKind::CellPhone => CellNumber().fake_with_rng(rng),
            FakeKind::Street => StreetName().fake_with_rng(rng),
            FakeKind::BuildingNumber => BuildingNumber().fake_with_rng(rng),
            FakeKind::City => CityName().fake_with_rng(rng),
            FakeKind::State => StateName().fake_with_rng(rng),
            FakeKind::StateAbbr => StateAbbr().fake_with_rng(rng),
            FakeKind::Zip => ZipCode().fake_with_rng(rng),
            FakeKind::Country => CountryName().fake_with_rng(rng),
            FakeKind::CountryCode => CountryCode().fake_with_rng(rng),
            FakeKind::Company => CompanyName().fake_with_rng(rng),
            FakeKind::Industry => Industry().fake_with_rng(rng),
            FakeKind::CatchPhrase => CatchPhrase().fake_with_rng(rng),
            FakeKind::Profession => Profession().fake_with_rng(rng),
            FakeKind::JobTitle => JobTitle().fake_with_rng(rng),
            FakeKind::Ipv4 => IPv4().fake_with_rng(rng),
            FakeKind::Ipv6 => IPv6().fake_with_rng(rng),
            FakeKind::MacAddress => MACAddress().fake_with_rng(rng),
            FakeKind::UserAgent => UserAgent().fake_with_rng(rng),
            FakeKind::CreditCard => CreditCardNumber().fake_with_rng(rng),
            FakeKind::Word => Word().fake_with_rng(rng),
            FakeKind::Sentence => Sentence(4..9).fake_with_rng(rng),
            FakeKind::Paragraph => Paragraph(2..4).fake_with_rng(rng),

            // Non-text values
            FakeKind::Latitude => return Value::Float(Latitude().fake_with_rng::<f64, _>(rng)),
            FakeKind::Longitude => return Value::Float(Longitude().fake_with_rng::<f64, _>(rng)),
            FakeKind::Boolean => return Value::Bool(Boolean(50).fake_with_rng(rng)),
        };
        Value::Text(text)
    }
}

/// Default external generator registry.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry;

impl FakeRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl ExternalGenerator for FakeRegistry {
    fn is_supported(&self, name: &str) -> bool {
        FakeKind::parse(name).is_some()
    }

    fn generate(&self, name: &str, rng: &mut dyn RngCore) -> anyhow::Result<Value> {
        match FakeKind::parse(name) {
            Some(kind) => Ok(kind.produce(rng)),
            None => anyhow::bail!(
                "Unknown fake generator: {}. Use: {}",
                name,
                SUPPORTED_GENERATORS.join(", ")
            ),
        }
    }
}
