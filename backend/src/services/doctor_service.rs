//! Doctor directory: random profile generation and listing.

use crate::database::models::{Doctor, Social};
use crate::errors::ServiceResult;
use crate::repositories::bounded;
use crate::repositories::doctor_repository::DoctorRepository;
use crate::utils::random::{float_between, int_between, pick, subset};
use chrono::Utc;
use rand::Rng;
use sqlx::SqlitePool;
use std::time::Duration;
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &["John", "Jane", "Chris", "Pat", "Alex"];
const LAST_NAMES: &[&str] = &["Smith", "Doe", "Taylor", "Brown", "Johnson"];
const SPECIALITIES: &[&str] = &[
    "Cardiologist",
    "Dermatologist",
    "Neurologist",
    "Pediatrician",
    "General Practitioner",
];
const CLINIC_NAMES: &[&str] = &["City Health Clinic", "Wellness Center", "Prime Care", "Health Plus"];
const CLINIC_ADDRESSES: &[&str] = &["123 Main St", "456 Oak Ave", "789 Pine Dr", "321 Maple Rd"];
const WEEKDAYS: &[&str] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
const LANGUAGES: &[&str] = &["English", "Spanish", "French", "German", "Chinese"];
const QUALIFICATIONS: &[&str] = &["MBBS", "MD", "PhD", "DO", "FACS"];
const SERVICES: &[&str] = &["Checkups", "Surgeries", "Consultations", "Therapy"];
const PROFILE_PICTURES: &[&str] = &[
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Ftse1.mm.bing.net%2Fth%3Fid%3DOIP.JW_4m4RVV4ywf0aiB6TWrgHaLH%26pid%3DApi&f=1&ipt=dd58503b66ddab2a90e68b839f95d9de46e096c5f8f37e0d884c2fbdbab00a48&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Fimages.pexels.com%2Fphotos%2F433635%2Fpexels-photo-433635.jpeg%3Fcs%3Dsrgb%26dl%3Dman-person-portrait-433635.jpg%26fm%3Djpg&f=1&nofb=1&ipt=17b17bb9cfb36962e00a22945b4ced1193a1b4776389faaa756a1066f992384f&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Fwallpapers.com%2Fimages%2Fhd%2Fdoctor-pictures-l5y1qs2998u7rf0x.jpg&f=1&nofb=1&ipt=c31e94270e3f49f2ea16e9b7eb7e2478b74a5e742c0c17cb11ca301b9306a923&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Fleman-clinic.ch%2Fwp-content%2Fuploads%2F2018%2F11%2F02.jpg&f=1&nofb=1&ipt=21cbc1542e3deb2204bb116537903fc06bbf4766151a1867997821c8830f202b&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Fsegurancadotrabalhosempre.com%2Fwp-content%2Fuploads%2F2016%2F08%2FO6T8LS01.jpg&f=1&nofb=1&ipt=3fc23700e0428c6dcce21bd76eacca7034eabafd0c2e884ae2b79eab90a513e4&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Ftse1.mm.bing.net%2Fth%3Fid%3DOIP.IVwf85npYYUcwRp4EIhqDgHaJm%26pid%3DApi&f=1&ipt=8b1382d10fd0e96c1a527ffc203d4bc2eec4bfcb3040a3a9138e18006e2e7504&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Fwww.advinohealthcare.com%2Fwp-content%2Fuploads%2F2020%2F08%2Fshutterstock_155685458.jpg&f=1&nofb=1&ipt=201a1977f129ca7d7068384bd60ec215ed83763aee70f43d2ba94df5fac5b45b&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Fpainlesshire.com%2Fwp-content%2Fuploads%2F2017%2F07%2Fdoctor.jpg&f=1&nofb=1&ipt=afd5f0341958babab3f3eb6bc3c3269d93db194b20fa990ab370c8ec424b422e&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Fimg.freepik.com%2Fpremium-photo%2Fmedical-concept-indian-beautiful-female-doctor-white-coat-with-stethoscope-waist-up-medical-student-woman-hospital-worker-looking-camera-smiling-studio-blue-background_185696-621.jpg%3Fw%3D2000&f=1&nofb=1&ipt=a134720cc6cf23db983914561e17706de1289e0b86f66022634cc92200f4f457&ipo=images",
    "https://external-content.duckduckgo.com/iu/?u=https%3A%2F%2Ftse1.mm.bing.net%2Fth%3Fid%3DOIP.P1IfJNdtz7GmKkfPqR2yNAHaIO%26pid%3DApi&f=1&ipt=a362572be5e9b50b4e5eb90e9645e43c502cb622daaccd5a34a30b17bfc81c4f&ipo=images",
];

/// Builds a plausible doctor profile from the fixed pools.
pub fn random_doctor<R: Rng + ?Sized>(rng: &mut R) -> Doctor {
    let phone = format!(
        "+1-{:03}-{:03}-{:04}",
        int_between(rng, 100, 999),
        int_between(rng, 100, 999),
        int_between(rng, 1000, 9999)
    );
    let email = format!(
        "{}.{}@example.com",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase()
    );
    let availability_days = int_between(rng, 2, 5) as usize;
    let language_count = int_between(rng, 1, 3) as usize;
    let qualification_count = int_between(rng, 1, 3) as usize;
    let service_count = int_between(rng, 1, 4) as usize;

    Doctor {
        id: Uuid::now_v7().to_string(),
        first_name: pick(rng, FIRST_NAMES).to_string(),
        last_name: pick(rng, LAST_NAMES).to_string(),
        speciality: pick(rng, SPECIALITIES).to_string(),
        phone,
        email,
        clinic_name: pick(rng, CLINIC_NAMES).to_string(),
        clinic_address: pick(rng, CLINIC_ADDRESSES).to_string(),
        profile_picture: pick(rng, PROFILE_PICTURES).to_string(),
        rating: float_between(rng, 3.5, 5.0) as f32,
        experience: int_between(rng, 1, 30),
        availability: subset(rng, WEEKDAYS, availability_days),
        fee: float_between(rng, 50.0, 500.0),
        languages: subset(rng, LANGUAGES, language_count),
        qualifications: subset(rng, QUALIFICATIONS, qualification_count),
        services: subset(rng, SERVICES, service_count),
        about: "Highly experienced doctor dedicated to patient care.".to_string(),
        social_links: Social::default(),
        created_at: Utc::now(),
    }
}

pub struct DoctorService<'a> {
    pool: &'a SqlitePool,
    storage_timeout: Duration,
}

impl<'a> DoctorService<'a> {
    pub fn new(pool: &'a SqlitePool, storage_timeout: Duration) -> Self {
        Self {
            pool,
            storage_timeout,
        }
    }

    /// Generates a random doctor and stores it.
    pub async fn generate_doctor(&self) -> ServiceResult<Doctor> {
        let doctor = random_doctor(&mut rand::thread_rng());
        let repo = DoctorRepository::new(self.pool);

        bounded(self.storage_timeout, "create_doctor", async {
            repo.create_doctor(&doctor).await.map_err(Into::into)
        })
        .await?;

        tracing::info!("Doctor added: {}", doctor.id);
        Ok(doctor)
    }

    pub async fn list_doctors(&self) -> ServiceResult<Vec<Doctor>> {
        let repo = DoctorRepository::new(self.pool);
        bounded(self.storage_timeout, "list_doctors", async {
            repo.list_doctors().await.map_err(Into::into)
        })
        .await
    }
}
