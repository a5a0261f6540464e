//! Modelos de dados compartilhados entre aplicações
//!
//! Este módulo define as estruturas principais do sistema de agendamento:
//! pessoas (pacientes e médicos), consultas e as projeções usadas nas
//! respostas da API.

use chrono::{NaiveDateTime, ParseError};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Formato de data/hora aceito e emitido pela API
pub const APPOINTMENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Interpreta um horário de consulta no formato `YYYY-MM-DD HH:MM`
pub fn parse_appointment_time(raw: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(raw, APPOINTMENT_TIME_FORMAT)
}

/// (De)serialização de horários de consulta no formato da API
pub mod appointment_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::APPOINTMENT_TIME_FORMAT;

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(APPOINTMENT_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, APPOINTMENT_TIME_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}

/// Status possíveis de uma consulta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Consulta marcada, ainda no futuro
    Scheduled,
    /// Cancelada pelo paciente
    Canceled,
    /// Horário já passou sem cancelamento
    Completed,
    /// Reservado para remarcações explícitas
    Rescheduled,
}

impl AppointmentStatus {
    /// Interpreta o valor textual armazenado no banco
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "canceled" => Some(AppointmentStatus::Canceled),
            "completed" => Some(AppointmentStatus::Completed),
            "rescheduled" => Some(AppointmentStatus::Rescheduled),
            _ => None,
        }
    }

    /// Valor textual usado no banco e nas respostas JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Canceled => "canceled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Rescheduled => "rescheduled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn decode_status(row: &SqliteRow) -> sqlx::Result<AppointmentStatus> {
    let raw: String = row.try_get("status")?;
    AppointmentStatus::parse(&raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: String::from("status"),
        source: Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Valor de status inválido: {}", raw),
        )),
    })
}

/// Uma pessoa cadastrada na clínica (paciente ou médico)
#[derive(Debug, Clone)]
pub struct Person {
    /// Identificador único da pessoa
    pub id: i64,
    /// Nome completo
    pub name: String,
    /// Email de contato, único no sistema
    pub email: String,
    /// Telefone de contato
    pub phone: String,
    /// Discriminador de papel: true para médicos
    pub is_doctor: bool,
    /// Especialidade médica (somente médicos)
    pub specialization: Option<String>,
    /// Hash argon2 da senha (somente pacientes; nunca sai pela API)
    pub password_hash: Option<String>,
    /// Data e hora de criação do registro
    pub created_at: NaiveDateTime,
    /// Data e hora da última atualização
    pub updated_at: NaiveDateTime,
}

impl FromRow<'_, SqliteRow> for Person {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            is_doctor: row.try_get("is_doctor")?,
            specialization: row.try_get("specialization")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Representa uma consulta entre paciente e médico
#[derive(Debug, Clone)]
pub struct Appointment {
    /// Identificador único da consulta
    pub id: i64,
    /// Identificador do médico
    pub doctor_id: i64,
    /// Identificador do paciente
    pub patient_id: i64,
    /// Data e hora marcada (precisão de minuto)
    pub appointment_time: NaiveDateTime,
    /// Status atual da consulta
    pub status: AppointmentStatus,
    /// Observações livres do paciente
    pub notes: Option<String>,
    /// Data e hora de criação do registro
    pub created_at: NaiveDateTime,
}

impl FromRow<'_, SqliteRow> for Appointment {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            doctor_id: row.try_get("doctor_id")?,
            patient_id: row.try_get("patient_id")?,
            appointment_time: row.try_get("appointment_time")?,
            status: decode_status(row)?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Projeção pública de um paciente para listagens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<Person> for PatientSummary {
    fn from(person: Person) -> Self {
        Self {
            name: person.name,
            email: person.email,
            phone: person.phone,
        }
    }
}

/// Projeção pública de um médico para listagens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: Option<String>,
}

impl From<Person> for DoctorSummary {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            email: person.email,
            phone: person.phone,
            specialization: person.specialization,
        }
    }
}

/// Consulta como aparece no perfil do próprio paciente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentView {
    pub id: i64,
    pub doctor_id: i64,
    #[serde(with = "appointment_time_format")]
    pub appointment_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl From<Appointment> for AppointmentView {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            doctor_id: appointment.doctor_id,
            appointment_time: appointment.appointment_time,
            status: appointment.status,
            notes: appointment.notes,
        }
    }
}

/// Item da listagem geral de consultas de um participante
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentListItem {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    #[serde(with = "appointment_time_format")]
    pub appointment_time: NaiveDateTime,
    pub status: AppointmentStatus,
}

impl From<Appointment> for AppointmentListItem {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            doctor_id: appointment.doctor_id,
            patient_id: appointment.patient_id,
            appointment_time: appointment.appointment_time,
            status: appointment.status,
        }
    }
}

/// Item da agenda pública de um médico
///
/// O id do paciente só é preenchido quando o requisitante é o próprio
/// médico; para os demais o campo sai como null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub patient_id: Option<i64>,
    #[serde(with = "appointment_time_format")]
    pub appointment_time: NaiveDateTime,
    pub status: AppointmentStatus,
}

impl ScheduleEntry {
    /// Converte uma consulta em item de agenda, ocultando o paciente se preciso
    pub fn from_appointment(appointment: Appointment, include_patient: bool) -> Self {
        Self {
            id: appointment.id,
            patient_id: include_patient.then_some(appointment.patient_id),
            appointment_time: appointment.appointment_time,
            status: appointment.status,
        }
    }
}

/// Perfil completo do paciente autenticado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub appointments: Vec<AppointmentView>,
}
