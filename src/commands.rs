//! Operations the UI host invokes, one per user action.

use serde::Serialize;

use crate::{
    error::CommandError,
    form::FormInput,
    log_error, log_info,
    models::UserSession,
    presentation::{format_confidence, present},
    quest::{QuestController, QuestOutcome, QuestSnapshot},
    AppState,
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceReport {
    pub state: String,
    pub icon: &'static str,
    pub message: &'static str,
    pub confidence: f64,
    pub confidence_display: String,
    /// Label and probability for every trained class, in label-code order.
    pub probabilities: Vec<(String, f64)>,
    pub quest: QuestOutcome,
}

fn controller_from_session(session: &UserSession) -> QuestController {
    QuestController::from_session(session.quest)
}

fn store_controller(session: &mut UserSession, controller: &QuestController) {
    session.quest = controller.session();
    session.touch();
}

pub fn run_inference(
    state: &AppState,
    session: &mut UserSession,
    input: &FormInput,
) -> Result<InferenceReport, CommandError> {
    let observation = input.to_observation();
    let prediction = state.engine.predict(&observation)?;

    let presentation = present(&prediction.state).map_err(|err| {
        log_error!("{}", err);
        err
    })?;

    let mut controller = controller_from_session(session);
    let quest = controller.observe_prediction(&prediction.state);
    store_controller(session, &controller);
    session.predictions += 1;
    session.last_state = Some(prediction.state.clone());

    log_info!(
        "Session {} predicted {} ({})",
        session.id,
        prediction.state,
        format_confidence(prediction.confidence)
    );

    let probabilities = state
        .engine
        .labels()
        .iter()
        .cloned()
        .zip(prediction.probabilities.iter().copied())
        .collect();

    Ok(InferenceReport {
        confidence_display: format_confidence(prediction.confidence),
        confidence: prediction.confidence,
        state: prediction.state,
        icon: presentation.icon,
        message: presentation.message,
        probabilities,
        quest,
    })
}

pub fn submit_quest_answer(session: &mut UserSession, answer: &str) -> QuestOutcome {
    let mut controller = controller_from_session(session);
    let outcome = controller.submit_answer(answer);
    store_controller(session, &controller);
    outcome
}

pub fn confirm_quest_return(session: &mut UserSession) -> QuestOutcome {
    let mut controller = controller_from_session(session);
    let outcome = controller.confirm_return();
    store_controller(session, &controller);
    outcome
}

pub fn get_quest_snapshot(session: &UserSession) -> QuestSnapshot {
    controller_from_session(session).snapshot()
}
