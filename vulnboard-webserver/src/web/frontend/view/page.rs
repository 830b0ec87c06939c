use maud::{html, Markup, PreEscaped, DOCTYPE};

const MAIN_CSS: &str = include_str!("main.css");

pub fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(MAIN_CSS)) }
            }
            body {
                (content)
            }
        }
    }
}
