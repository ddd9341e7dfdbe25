use gloo_timers::callback::Timeout;
use payloads::PlanDraft;
use yew::prelude::*;

use crate::{
    contexts::toast::{Toast, use_toast},
    get_api_client,
};

/// How long the "Draft saved" toast stays up.
const SAVED_TOAST_MS: u32 = 2500;

pub struct AutosaveHandle {
    /// Restart the quiet-period timer with the latest draft.
    pub schedule: Callback<PlanDraft>,
    /// Save right away, dropping any pending timer.
    pub save_now: Callback<PlanDraft>,
    /// Drop any pending timer without saving.
    pub cancel: Callback<()>,
}

/// Background draft saving for the plan form.
///
/// At most one save fires per quiet period: every `schedule` replaces the
/// pending timer, and dropping a `Timeout` clears it.
#[hook]
pub fn use_autosave(
    form_action: AttrValue,
    csrf_token: Option<AttrValue>,
    delay_ms: u32,
    enabled: bool,
) -> AutosaveHandle {
    let toast = use_toast();
    let pending = use_mut_ref(|| None::<Timeout>);

    // Never touches `pending`: it runs from inside the timer callback.
    let save = use_callback(
        (form_action, csrf_token, enabled),
        move |draft: PlanDraft, (form_action, csrf_token, enabled)| {
            if !*enabled {
                return;
            }

            let form_action = form_action.clone();
            let csrf_token = csrf_token.clone();
            let toast = toast.clone();

            yew::platform::spawn_local(async move {
                let api_client = get_api_client();
                match api_client
                    .save_draft(
                        &form_action,
                        csrf_token.as_deref(),
                        draft.form_fields(),
                    )
                    .await
                {
                    Ok(saved) if saved.success => {
                        tracing::debug!(rows = draft.len(), "Draft saved");
                        toast.add(
                            Toast::success("Draft saved".to_string())
                                .duration(SAVED_TOAST_MS),
                        );
                    }
                    Ok(_) => {
                        tracing::warn!("Draft save was not acknowledged");
                    }
                    Err(e) => {
                        tracing::warn!("Failed to save draft: {e}");
                        toast.error("Failed to save draft");
                    }
                }
            });
        },
    );

    let schedule = {
        let pending = pending.clone();
        use_callback(
            (save.clone(), delay_ms, enabled),
            move |draft: PlanDraft, (save, delay_ms, enabled)| {
                if !*enabled {
                    return;
                }
                let save = save.clone();
                *pending.borrow_mut() =
                    Some(Timeout::new(*delay_ms, move || save.emit(draft)));
            },
        )
    };

    let save_now = {
        let pending = pending.clone();
        use_callback(save, move |draft: PlanDraft, save| {
            pending.borrow_mut().take();
            save.emit(draft);
        })
    };

    let cancel = use_callback((), move |_, _| {
        pending.borrow_mut().take();
    });

    AutosaveHandle {
        schedule,
        save_now,
        cancel,
    }
}
