//! Camada de consultas do banco de agendamentos
//!
//! Todas as operações que dependem de posse (paciente dono da consulta)
//! embutem a verificação na própria cláusula WHERE, de forma que um id
//! alheio se comporta exatamente como um id inexistente.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbError;
use crate::models::{Appointment, Person};

/// Insere um novo paciente e retorna o id gerado
pub async fn create_patient(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    password_hash: &str,
) -> Result<i64, DbError> {
    let result = sqlx::query(
        "INSERT INTO persons (name, email, phone, is_doctor, password_hash)
         VALUES (?, ?, ?, 0, ?)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(password_hash)
    .execute(pool)
    .await?;

    debug!("Paciente inserido com id {}", result.last_insert_rowid());
    Ok(result.last_insert_rowid())
}

/// Insere um novo médico e retorna o id gerado
pub async fn create_doctor(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    specialization: &str,
) -> Result<i64, DbError> {
    let result = sqlx::query(
        "INSERT INTO persons (name, email, phone, is_doctor, specialization)
         VALUES (?, ?, ?, 1, ?)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(specialization)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Busca um paciente pelo email de login
pub async fn find_patient_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Person>, DbError> {
    let person = sqlx::query_as::<_, Person>(
        "SELECT id, created_at, updated_at, name, email, phone, is_doctor,
                specialization, password_hash
         FROM persons WHERE email = ? AND is_doctor = 0",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(person)
}

/// Busca um paciente pelo id
pub async fn find_patient(pool: &SqlitePool, id: i64) -> Result<Option<Person>, DbError> {
    let person = sqlx::query_as::<_, Person>(
        "SELECT id, created_at, updated_at, name, email, phone, is_doctor,
                specialization, password_hash
         FROM persons WHERE id = ? AND is_doctor = 0",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(person)
}

/// Busca um médico pelo id
pub async fn find_doctor(pool: &SqlitePool, id: i64) -> Result<Option<Person>, DbError> {
    let person = sqlx::query_as::<_, Person>(
        "SELECT id, created_at, updated_at, name, email, phone, is_doctor,
                specialization, password_hash
         FROM persons WHERE id = ? AND is_doctor = 1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(person)
}

/// Lista todos os pacientes cadastrados
pub async fn list_patients(pool: &SqlitePool) -> Result<Vec<Person>, DbError> {
    let persons = sqlx::query_as::<_, Person>(
        "SELECT id, created_at, updated_at, name, email, phone, is_doctor,
                specialization, password_hash
         FROM persons WHERE is_doctor = 0 ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(persons)
}

/// Lista todos os médicos cadastrados
pub async fn list_doctors(pool: &SqlitePool) -> Result<Vec<Person>, DbError> {
    let persons = sqlx::query_as::<_, Person>(
        "SELECT id, created_at, updated_at, name, email, phone, is_doctor,
                specialization, password_hash
         FROM persons WHERE is_doctor = 1 ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(persons)
}

/// Atualiza os dados cadastrais de um paciente
pub async fn update_patient_info(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    email: &str,
    phone: &str,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE persons
         SET name = ?, email = ?, phone = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ? AND is_doctor = 0",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Procura uma consulta 'scheduled' que ocupe o horário do médico
///
/// `exclude` permite ignorar a própria consulta durante uma remarcação.
pub async fn find_scheduled_conflict(
    pool: &SqlitePool,
    doctor_id: i64,
    appointment_time: NaiveDateTime,
    exclude: Option<i64>,
) -> Result<Option<i64>, DbError> {
    let conflict = match exclude {
        Some(excluded_id) => {
            sqlx::query_scalar::<_, i64>(
                "SELECT id FROM appointments
                 WHERE doctor_id = ? AND appointment_time = ?
                   AND status = 'scheduled' AND id != ?",
            )
            .bind(doctor_id)
            .bind(appointment_time)
            .bind(excluded_id)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_scalar::<_, i64>(
                "SELECT id FROM appointments
                 WHERE doctor_id = ? AND appointment_time = ? AND status = 'scheduled'",
            )
            .bind(doctor_id)
            .bind(appointment_time)
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(conflict)
}

/// Insere uma nova consulta já no status 'scheduled'
///
/// O índice único parcial garante que dois pedidos simultâneos para o
/// mesmo médico e horário não passem ambos: o perdedor recebe
/// `DbError::ConstraintViolation`.
pub async fn create_appointment(
    pool: &SqlitePool,
    doctor_id: i64,
    patient_id: i64,
    appointment_time: NaiveDateTime,
    notes: Option<&str>,
) -> Result<i64, DbError> {
    let result = sqlx::query(
        "INSERT INTO appointments (doctor_id, patient_id, appointment_time, status, notes)
         VALUES (?, ?, ?, 'scheduled', ?)",
    )
    .bind(doctor_id)
    .bind(patient_id)
    .bind(appointment_time)
    .bind(notes)
    .execute(pool)
    .await?;

    debug!(
        "Consulta {} inserida para médico {} em {}",
        result.last_insert_rowid(),
        doctor_id,
        appointment_time
    );
    Ok(result.last_insert_rowid())
}

/// Busca uma consulta pertencente ao paciente informado
pub async fn find_owned_appointment(
    pool: &SqlitePool,
    id: i64,
    patient_id: i64,
) -> Result<Option<Appointment>, DbError> {
    let appointment = sqlx::query_as::<_, Appointment>(
        "SELECT id, created_at, doctor_id, patient_id, appointment_time, status, notes
         FROM appointments WHERE id = ? AND patient_id = ?",
    )
    .bind(id)
    .bind(patient_id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Atualiza horário e/ou observações de uma consulta do paciente
///
/// Um horário novo devolve a consulta ao status 'scheduled'; campos não
/// informados permanecem como estão. Retorna a consulta já atualizada.
pub async fn update_appointment(
    pool: &SqlitePool,
    id: i64,
    patient_id: i64,
    new_time: Option<NaiveDateTime>,
    notes: Option<&str>,
) -> Result<Option<Appointment>, DbError> {
    sqlx::query(
        "UPDATE appointments
         SET appointment_time = COALESCE(?, appointment_time),
             status = CASE WHEN ? IS NOT NULL THEN 'scheduled' ELSE status END,
             notes = COALESCE(?, notes)
         WHERE id = ? AND patient_id = ?",
    )
    .bind(new_time)
    .bind(new_time)
    .bind(notes)
    .bind(id)
    .bind(patient_id)
    .execute(pool)
    .await?;

    find_owned_appointment(pool, id, patient_id).await
}

/// Marca uma consulta do paciente como cancelada
pub async fn cancel_appointment(
    pool: &SqlitePool,
    id: i64,
    patient_id: i64,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE appointments SET status = 'canceled' WHERE id = ? AND patient_id = ?",
    )
    .bind(id)
    .bind(patient_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove definitivamente uma consulta do paciente
pub async fn delete_appointment(
    pool: &SqlitePool,
    id: i64,
    patient_id: i64,
) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = ? AND patient_id = ?")
        .bind(id)
        .bind(patient_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Conclui as consultas 'scheduled' do paciente cujo horário já passou
///
/// Retorna quantas consultas mudaram de status.
pub async fn complete_past_appointments(
    pool: &SqlitePool,
    patient_id: i64,
    now: NaiveDateTime,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        "UPDATE appointments SET status = 'completed'
         WHERE patient_id = ? AND status = 'scheduled' AND appointment_time < ?",
    )
    .bind(patient_id)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Lista as consultas de um paciente, da mais antiga para a mais recente
pub async fn list_patient_appointments(
    pool: &SqlitePool,
    patient_id: i64,
) -> Result<Vec<Appointment>, DbError> {
    let appointments = sqlx::query_as::<_, Appointment>(
        "SELECT id, created_at, doctor_id, patient_id, appointment_time, status, notes
         FROM appointments WHERE patient_id = ?
         ORDER BY appointment_time, id",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Lista a agenda de um médico, da mais antiga para a mais recente
pub async fn list_doctor_appointments(
    pool: &SqlitePool,
    doctor_id: i64,
) -> Result<Vec<Appointment>, DbError> {
    let appointments = sqlx::query_as::<_, Appointment>(
        "SELECT id, created_at, doctor_id, patient_id, appointment_time, status, notes
         FROM appointments WHERE doctor_id = ?
         ORDER BY appointment_time, id",
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Lista as consultas em que a pessoa participa, como paciente ou médico
pub async fn list_appointments_for_person(
    pool: &SqlitePool,
    person_id: i64,
) -> Result<Vec<Appointment>, DbError> {
    let appointments = sqlx::query_as::<_, Appointment>(
        "SELECT id, created_at, doctor_id, patient_id, appointment_time, status, notes
         FROM appointments WHERE patient_id = ? OR doctor_id = ?
         ORDER BY appointment_time, id",
    )
    .bind(person_id)
    .bind(person_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
