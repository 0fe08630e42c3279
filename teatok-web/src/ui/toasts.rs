use teatok_client::Notice;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ToastsProps {
    pub notices: Vec<(usize, Notice)>,
    pub on_dismiss: Callback<usize>,
}

#[function_component(Toasts)]
pub fn toasts(p: &ToastsProps) -> Html {
    html! {
        <div class="toast-container position-fixed bottom-0 end-0 p-3">
            { for p.notices.iter().map(|(id, n)| {
                let id = *id;
                html! {
                    <div
                        class={ classes!(
                            "toast", "show",
                            n.is_error().then(|| "text-bg-danger"),
                        ) }
                        role="status"
                        onclick={ p.on_dismiss.reform(move |_| id) }
                    >
                        <div class="toast-header"><strong>{ n.title() }</strong></div>
                        <div class="toast-body">{ &n.description }</div>
                    </div>
                }
            }) }
        </div>
    }
}
