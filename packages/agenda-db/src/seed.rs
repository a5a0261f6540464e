//! Dados de demonstração do sistema de agendamento
//!
//! O conjunto espelha o ambiente de homologação: dois pacientes e dez
//! médicos de especialidades variadas.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

use crate::store;

/// Paciente do conjunto de demonstração (senha em texto plano)
pub struct SeedPatient {
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub password: &'static str,
}

/// Médico do conjunto de demonstração
pub struct SeedDoctor {
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub specialization: &'static str,
}

pub const SEED_PATIENTS: &[SeedPatient] = &[
    SeedPatient {
        name: "John Doe",
        email: "john@example.com",
        phone: "1234567890",
        password: "password123",
    },
    SeedPatient {
        name: "Jane Smith",
        email: "jane@example.com",
        phone: "0987654321",
        password: "password123",
    },
];

pub const SEED_DOCTORS: &[SeedDoctor] = &[
    SeedDoctor {
        name: "Dr. Alice",
        email: "alice@example.com",
        phone: "5551234567",
        specialization: "Cardiology",
    },
    SeedDoctor {
        name: "Dr. Bob",
        email: "bob@example.com",
        phone: "5559876543",
        specialization: "Dermatology",
    },
    SeedDoctor {
        name: "Dr. Charlie",
        email: "charlie@example.com",
        phone: "5551122334",
        specialization: "Pediatrics",
    },
    SeedDoctor {
        name: "Dr. David",
        email: "david@example.com",
        phone: "5554455667",
        specialization: "Neurology",
    },
    SeedDoctor {
        name: "Dr. Emily",
        email: "emily@example.com",
        phone: "5557788990",
        specialization: "Orthopedics",
    },
    SeedDoctor {
        name: "Dr. Frank",
        email: "frank@example.com",
        phone: "5552233445",
        specialization: "Gastroenterology",
    },
    SeedDoctor {
        name: "Dr. Grace",
        email: "grace@example.com",
        phone: "5555566778",
        specialization: "Psychiatry",
    },
    SeedDoctor {
        name: "Dr. Henry",
        email: "henry@example.com",
        phone: "5558899001",
        specialization: "Endocrinology",
    },
    SeedDoctor {
        name: "Dr. Isabella",
        email: "isabella@example.com",
        phone: "5553344556",
        specialization: "Radiology",
    },
    SeedDoctor {
        name: "Dr. Jack",
        email: "jack@example.com",
        phone: "5556677889",
        specialization: "Urology",
    },
];

/// Verifica se os dados de demonstração já foram aplicados
pub async fn already_seeded(pool: &SqlitePool) -> Result<bool> {
    let first = SEED_PATIENTS
        .first()
        .map(|p| p.email)
        .unwrap_or_default();
    Ok(store::find_patient_by_email(pool, first).await?.is_some())
}

/// Insere o conjunto de demonstração no banco
///
/// O hash de senha fica a cargo do chamador, que conhece o algoritmo em
/// uso na aplicação.
pub async fn seed_demo_data<F>(pool: &SqlitePool, mut hash_password: F) -> Result<()>
where
    F: FnMut(&str) -> Result<String>,
{
    for patient in SEED_PATIENTS {
        let password_hash = hash_password(patient.password)?;
        store::create_patient(pool, patient.name, patient.email, patient.phone, &password_hash)
            .await?;
    }

    for doctor in SEED_DOCTORS {
        store::create_doctor(pool, doctor.name, doctor.email, doctor.phone, doctor.specialization)
            .await?;
    }

    info!(
        "Dados de demonstração aplicados: {} pacientes, {} médicos",
        SEED_PATIENTS.len(),
        SEED_DOCTORS.len()
    );
    Ok(())
}
