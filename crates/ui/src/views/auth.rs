use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let session = use_resource({
        let progress = progress.clone();
        move || {
            let progress = progress.clone();
            async move { progress.current_session().await.ok().flatten() }
        }
    });
    let returning = session
        .read()
        .as_ref()
        .and_then(|session| session.as_ref())
        .map(|session| session.user.first_name().to_owned());

    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { class: "auth-title", "{ctx.app_name()}" }
                p { class: "auth-subtitle",
                    "Learn German step by step, from your first words to native-like fluency."
                }
                if let Some(name) = returning {
                    Link { class: "btn btn-secondary", to: Route::Dashboard {}, "Continue as {name}" }
                }
                button {
                    class: "btn btn-primary auth-signin",
                    r#type: "button",
                    disabled: busy(),
                    onclick: move |_| {
                        let progress = progress.clone();
                        busy.set(true);
                        spawn(async move {
                            match progress.sign_in().await {
                                Ok(_) => {
                                    error.set(None);
                                    let _ = navigator.push(Route::Dashboard {});
                                }
                                Err(err) => error.set(Some(ViewError::from(err))),
                            }
                            busy.set(false);
                        });
                    },
                    "Sign in with Google"
                }
                if let Some(err) = error() {
                    p { class: "error", "{err.message()}" }
                }
            }
        }
    }
}
