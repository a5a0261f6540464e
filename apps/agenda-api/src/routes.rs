//! Rotas HTTP do serviço de agendamento
//!
//! Camada fina entre o axum e o agenda-db: valida entradas, aplica as
//! regras de agendamento e serializa as respostas. As mensagens em
//! inglês fazem parte do contrato com o frontend.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use agenda_db::error::DbError;
use agenda_db::models::{
    AppointmentListItem, AppointmentView, DoctorSummary, PatientProfile, PatientSummary,
    ScheduleEntry, APPOINTMENT_TIME_FORMAT,
};
use agenda_db::store;

use crate::auth::{self, CurrentUser};
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;
use crate::validators;

/// Monta o roteador completo da API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/patients/register", post(register_patient))
        .route("/api/patients/login", post(login_patient))
        .route(
            "/api/patients/profile",
            get(get_patient_profile).put(update_patient_info),
        )
        .route("/api/patients", get(get_patients))
        .route("/api/doctors", get(get_doctors))
        .route("/api/doctors/:doctor_id/appointments", get(get_doctor_appointments))
        .route("/api/appointments/create", post(create_appointment))
        .route("/api/appointments", get(get_appointments))
        .route(
            "/api/appointments/:appointment_id",
            axum::routing::put(update_appointment).delete(cancel_appointment),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    name: String,
    email: String,
    phone: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct UpdateProfilePayload {
    name: String,
    email: String,
    phone: String,
}

#[derive(Debug, Deserialize)]
struct CreateAppointmentPayload {
    doctor_id: i64,
    appointment_time: String,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateAppointmentPayload {
    #[serde(default)]
    appointment_time: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    #[serde(default)]
    purge: bool,
}

/// GET /health - identificação e versão do serviço
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": crate::built_info::PKG_NAME,
        "version": crate::built_info::PKG_VERSION,
    }))
}

/// POST /api/patients/register - cadastra um novo paciente
async fn register_patient(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    validators::validate_email(&payload.email)?;
    validators::validate_password(&payload.password)?;

    let password_hash = auth::hash_password(&payload.password)?;
    match store::create_patient(
        &state.pool,
        &payload.name,
        &payload.email,
        &payload.phone,
        &password_hash,
    )
    .await
    {
        Ok(patient_id) => {
            info!("Paciente {} cadastrado", patient_id);
            Ok((
                StatusCode::CREATED,
                Json(json!({ "msg": "Patient registered successfully" })),
            ))
        }
        Err(DbError::ConstraintViolation(_)) => {
            Err(ApiError::Validation("Email is already registered".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /api/patients/login - autentica e emite o token de acesso
async fn login_patient(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<Json<Value>, ApiError> {
    let patient = match store::find_patient_by_email(&state.pool, &payload.email).await? {
        Some(patient) => patient,
        None => return Err(ApiError::Auth("Bad email or password".to_string())),
    };

    let password_ok = patient
        .password_hash
        .as_deref()
        .map(|hash| auth::verify_password(&payload.password, hash))
        .unwrap_or(false);
    if !password_ok {
        return Err(ApiError::Auth("Bad email or password".to_string()));
    }

    let access_token = auth::issue_token(patient.id, &state.config.jwt_secret)?;
    Ok(Json(json!({ "access_token": access_token })))
}

/// GET /api/patients/profile - perfil do paciente com suas consultas
///
/// Antes de responder, consultas 'scheduled' cujo horário já passou são
/// concluídas, de forma que o cliente nunca veja uma consulta passada
/// ainda marcada como agendada.
async fn get_patient_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<PatientProfile>, ApiError> {
    let patient = match store::find_patient(&state.pool, user.id).await? {
        Some(patient) => patient,
        None => return Err(ApiError::NotFound("Patient not found".to_string())),
    };

    let now = Local::now().naive_local();
    let completed = store::complete_past_appointments(&state.pool, user.id, now).await?;
    if completed > 0 {
        info!("{} consulta(s) do paciente {} concluídas", completed, user.id);
    }

    let appointments = store::list_patient_appointments(&state.pool, user.id).await?;
    Ok(Json(PatientProfile {
        id: patient.id,
        name: patient.name,
        email: patient.email,
        phone: patient.phone,
        appointments: appointments.into_iter().map(AppointmentView::from).collect(),
    }))
}

/// PUT /api/patients/profile - atualiza os dados cadastrais
async fn update_patient_info(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<UpdateProfilePayload>,
) -> Result<Json<Value>, ApiError> {
    validators::validate_name(&payload.name)?;
    validators::validate_email(&payload.email)?;
    validators::validate_phone(&payload.phone)?;

    match store::update_patient_info(
        &state.pool,
        user.id,
        &payload.name,
        &payload.email,
        &payload.phone,
    )
    .await
    {
        Ok(true) => Ok(Json(json!({ "msg": "Patient information updated successfully" }))),
        Ok(false) => Err(ApiError::NotFound("Patient not found".to_string())),
        Err(DbError::ConstraintViolation(_)) => {
            Err(ApiError::Validation("Email is already registered".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/patients - listagem pública de pacientes
async fn get_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientSummary>>, ApiError> {
    let patients = store::list_patients(&state.pool).await?;
    Ok(Json(patients.into_iter().map(PatientSummary::from).collect()))
}

/// GET /api/doctors - listagem pública de médicos
async fn get_doctors(State(state): State<AppState>) -> Result<Json<Vec<DoctorSummary>>, ApiError> {
    let doctors = store::list_doctors(&state.pool).await?;
    Ok(Json(doctors.into_iter().map(DoctorSummary::from).collect()))
}

/// GET /api/doctors/:doctor_id/appointments - agenda de um médico
///
/// Qualquer pessoa autenticada enxerga os horários ocupados; o id do
/// paciente de cada consulta só aparece para o próprio médico.
async fn get_doctor_appointments(
    State(state): State<AppState>,
    Path(doctor_id): Path<i64>,
    user: CurrentUser,
) -> Result<Json<Vec<ScheduleEntry>>, ApiError> {
    if store::find_doctor(&state.pool, doctor_id).await?.is_none() {
        return Err(ApiError::NotFound("Doctor not found".to_string()));
    }

    let include_patient = user.id == doctor_id;
    let appointments = store::list_doctor_appointments(&state.pool, doctor_id).await?;
    let entries = appointments
        .into_iter()
        .map(|appointment| ScheduleEntry::from_appointment(appointment, include_patient))
        .collect();

    Ok(Json(entries))
}

/// POST /api/appointments/create - agenda uma nova consulta
async fn create_appointment(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<CreateAppointmentPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if store::find_patient(&state.pool, user.id).await?.is_none() {
        return Err(ApiError::NotFound("Patient not found".to_string()));
    }

    let doctor = match store::find_doctor(&state.pool, payload.doctor_id).await? {
        Some(doctor) => doctor,
        None => return Err(ApiError::NotFound("Doctor not found".to_string())),
    };

    let appointment_time = validators::validate_appointment_time(&payload.appointment_time)?;
    if let Some(notes) = payload.notes.as_deref() {
        validators::validate_notes(notes)?;
    }

    // Pré-verificação para responder com a mensagem esperada; a corrida
    // restante entre dois pedidos simultâneos é fechada pelo índice único
    if store::find_scheduled_conflict(&state.pool, doctor.id, appointment_time, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation("Time slot is already taken".to_string()));
    }

    match store::create_appointment(
        &state.pool,
        doctor.id,
        user.id,
        appointment_time,
        payload.notes.as_deref(),
    )
    .await
    {
        Ok(appointment_id) => {
            info!(
                "Consulta {} criada: paciente {} com médico {} em {}",
                appointment_id, user.id, doctor.id, appointment_time
            );
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "msg": "Appointment created successfully",
                    "appointment_id": appointment_id,
                })),
            ))
        }
        Err(DbError::ConstraintViolation(_)) => {
            Err(ApiError::Validation("Time slot is already taken".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/appointments - consultas em que o requisitante participa
async fn get_appointments(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<AppointmentListItem>>, ApiError> {
    let appointments = store::list_appointments_for_person(&state.pool, user.id).await?;
    Ok(Json(appointments.into_iter().map(AppointmentListItem::from).collect()))
}

/// PUT /api/appointments/:appointment_id - remarca e/ou altera observações
///
/// Remarcar para o horário atual da própria consulta não é conflito; um
/// horário novo devolve a consulta ao status 'scheduled'.
async fn update_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<UpdateAppointmentPayload>,
) -> Result<Json<Value>, ApiError> {
    let not_found =
        || "Appointment not found or you do not have permission to update it".to_string();

    let appointment = match store::find_owned_appointment(&state.pool, appointment_id, user.id)
        .await?
    {
        Some(appointment) => appointment,
        None => return Err(ApiError::NotFound(not_found())),
    };

    let mut new_time = None;
    if let Some(raw) = payload.appointment_time.as_deref() {
        let parsed = validators::validate_appointment_time(raw)?;
        if parsed != appointment.appointment_time
            && store::find_scheduled_conflict(
                &state.pool,
                appointment.doctor_id,
                parsed,
                Some(appointment.id),
            )
            .await?
            .is_some()
        {
            return Err(ApiError::Validation("Time slot is already taken".to_string()));
        }
        new_time = Some(parsed);
    }

    if let Some(notes) = payload.notes.as_deref() {
        validators::validate_notes(notes)?;
    }

    let updated = match store::update_appointment(
        &state.pool,
        appointment.id,
        user.id,
        new_time,
        payload.notes.as_deref(),
    )
    .await
    {
        Ok(Some(updated)) => updated,
        Ok(None) => return Err(ApiError::NotFound(not_found())),
        Err(DbError::ConstraintViolation(_)) => {
            return Err(ApiError::Validation("Time slot is already taken".to_string()))
        }
        Err(err) => return Err(err.into()),
    };

    info!("Consulta {} atualizada pelo paciente {}", updated.id, user.id);
    Ok(Json(json!({
        "msg": "Appointment updated successfully",
        "appointment_time": updated.appointment_time.format(APPOINTMENT_TIME_FORMAT).to_string(),
        "status": updated.status,
        "notes": updated.notes,
    })))
}

/// DELETE /api/appointments/:appointment_id - cancela uma consulta
///
/// Por padrão o registro é mantido com status 'canceled', preservando o
/// histórico; `?purge=true` remove a linha em definitivo.
async fn cancel_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<i64>,
    Query(params): Query<DeleteParams>,
    user: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    if params.purge {
        return if store::delete_appointment(&state.pool, appointment_id, user.id).await? {
            info!("Consulta {} removida pelo paciente {}", appointment_id, user.id);
            Ok(Json(json!({ "msg": "Appointment deleted successfully" })))
        } else {
            Err(ApiError::NotFound(
                "Appointment not found or you do not have permission to delete it".to_string(),
            ))
        };
    }

    if store::cancel_appointment(&state.pool, appointment_id, user.id).await? {
        info!("Consulta {} cancelada pelo paciente {}", appointment_id, user.id);
        Ok(Json(json!({ "msg": "Appointment canceled successfully" })))
    } else {
        Err(ApiError::NotFound(
            "Appointment not found or you do not have permission to cancel it".to_string(),
        ))
    }
}
