use teatok_client::api::{NewPost, RoomId, UserId};
use yew::prelude::*;

const DEFAULT_ROOM: &str = "general";

#[derive(Clone, PartialEq, Properties)]
pub struct NewPostFormProps {
    pub author: UserId,
    pub disabled: bool,
    pub on_submit: Callback<NewPost>,
}

#[function_component(NewPostForm)]
pub fn new_post_form(p: &NewPostFormProps) -> Html {
    let title = use_state(String::new);
    let content = use_state(String::new);
    let room = use_state(|| String::from(DEFAULT_ROOM));
    let can_submit = !p.disabled && !title.trim().is_empty() && !content.trim().is_empty();

    let on_submit = {
        let (title, content, room) = (title.clone(), content.clone(), room.clone());
        let author = p.author.clone();
        let on_submit = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(NewPost {
                title: (*title).clone(),
                content: (*content).clone(),
                author_id: author.clone(),
                room_id: RoomId((*room).clone()),
                category: String::from("tea"),
                duration: String::from("24h"),
                is_voice_note: false,
            });
            title.set(String::new());
            content.set(String::new());
        })
    };
    macro_rules! setter_for {
        ($state:ident, $elt:ty) => {{
            let $state = $state.clone();
            Callback::from(move |e: InputEvent| {
                let input: $elt = e.target_unchecked_into();
                $state.set(input.value())
            })
        }};
    }

    html! {
        <form class="new-post-form card card-body my-3" onsubmit={ on_submit }>
            <div class="input-group mb-2">
                <span class="input-group-text">{ "#" }</span>
                <input
                    type="text"
                    class="form-control"
                    placeholder="Room"
                    aria-label="Room"
                    value={ (*room).clone() }
                    oninput={ setter_for!(room, web_sys::HtmlInputElement) }
                />
            </div>
            <input
                type="text"
                class="form-control mb-2"
                placeholder="Title"
                aria-label="Title"
                value={ (*title).clone() }
                oninput={ setter_for!(title, web_sys::HtmlInputElement) }
            />
            <textarea
                class="form-control mb-2"
                placeholder="Spill the tea..."
                value={ (*content).clone() }
                oninput={ setter_for!(content, web_sys::HtmlTextAreaElement) }
            />
            <button type="submit" class="btn btn-primary" disabled={ !can_submit }>
                { "Post" }
            </button>
        </form>
    }
}
