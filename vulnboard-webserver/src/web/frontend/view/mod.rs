//! HTML of the board.
//!
//! Values wrapped in `PreEscaped` are written into the document as they
//! are. Every user controlled value is rendered that way.

use maud::{html, Markup, PreEscaped};
use vulnboard_application::{error::AppError, prelude::*};
use vulnboard_core::{entities::Comment, lab::DebugNote};

mod page;

use page::*;

const TITLE: &str = "Sistema de Comentarios Vulnerable - Lab";

const XSS_PAYLOADS: &str = r#"<script>alert('XSS')</script>
<img src=x onerror="alert('XSS')">
<svg onload=alert('XSS')>
<iframe src="javascript:alert('XSS')">"#;

const SQLI_PAYLOADS: &str = r#"' OR '1'='1' --
' UNION SELECT null, sql, null, null FROM sqlite_master--"#;

pub fn board(search_input: Option<&str>, response: &BoardResponse) -> Markup {
    page(
        TITLE,
        html! {
            div class="container" {
                div class="header" {
                    h1 { "🔓 Sistema de Comentarios Vulnerable" }
                    p { "Aplicación para Laboratorio de Seguridad" }
                }
                div class="warning" {
                    "⚠️ SOLO PARA LABORATORIO - CONTIENE VULNERABILIDADES INTENCIONALES"
                }
                div class="content" {
                    (vuln_info())
                    (submission_form())
                    (search_form(search_input))
                    @if response.comment_added {
                        div class="flash success" { "✅ Comentario agregado exitosamente" }
                    }
                    @match &response.listing {
                        Ok(listing) => (listing_section(listing)),
                        Err(err) => (error_banner(err)),
                    }
                    (payload_reference())
                }
            }
        },
    )
}

fn vuln_info() -> Markup {
    html! {
        div class="vuln-info" {
            h3 { "🐛 Vulnerabilidades Implementadas:" }
            ul {
                li { strong { "XSS Reflejado:" } " El campo de búsqueda no sanitiza la entrada" }
                li { strong { "XSS Almacenado:" } " Los comentarios se guardan sin filtrar" }
                li { strong { "SQL Injection:" } " La búsqueda es vulnerable a inyección SQL" }
                li { strong { "Sin validación:" } " No hay protección CSRF ni validación de entrada" }
            }
        }
    }
}

fn submission_form() -> Markup {
    html! {
        h2 { "Agregar Comentario" }
        form method="POST" action="" {
            div class="form-group" {
                label for="nombre" { "Nombre:" }
                input type="text" id="nombre" name="nombre" required;
            }
            div class="form-group" {
                label for="comentario" { "Comentario:" }
                textarea id="comentario" name="comentario" required {}
            }
            button type="submit" name="agregar" { "Publicar Comentario" }
        }
    }
}

pub fn search_form(search_input: Option<&str>) -> Markup {
    html! {
        h2 class="section" { "Buscar Comentarios" }
        form method="GET" action="" {
            div class="form-group" {
                label for="buscar" { "Buscar por nombre:" }
                input type="text" id="buscar" name="buscar"
                    value=(PreEscaped(search_input.unwrap_or_default()));
            }
            button type="submit" { "Buscar" }
        }
    }
}

fn listing_section(listing: &BoardListing) -> Markup {
    let BoardListing {
        search_term,
        comments,
        debug_notes,
    } = listing;
    html! {
        @if let Some(term) = search_term {
            div class="flash info" {
                "Resultados para: " strong { (PreEscaped(term)) }
            }
        }
        div class="comments" {
            h2 { "Comentarios Recientes" }
            @for comment in comments {
                (comment_item(comment))
            }
            @if comments.is_empty() {
                p class="empty" { "No hay comentarios aún. ¡Sé el primero en comentar!" }
            }
        }
        @for note in debug_notes {
            (debug_comment(note))
        }
    }
}

fn comment_item(comment: &Comment) -> Markup {
    html! {
        div class="comment" {
            div class="comment-author" { (PreEscaped(&comment.author)) }
            div class="comment-date" {
                @if let Some(created_at) = &comment.created_at {
                    (created_at.to_string())
                }
            }
            div class="comment-text" { (PreEscaped(&comment.body)) }
        }
    }
}

fn debug_comment(note: &DebugNote) -> Markup {
    PreEscaped(format!("<!--! {note} -->"))
}

fn error_banner(err: &AppError) -> Markup {
    html! {
        div class="flash error" {
            "Error de base de datos: " (PreEscaped(err.to_string()))
        }
    }
}

fn payload_reference() -> Markup {
    html! {
        div class="payloads" {
            h3 { "💉 Ejemplos de Payloads XSS para Testing:" }
            pre { (XSS_PAYLOADS) }
            h3 { "💉 Ejemplo de SQL Injection en Búsqueda:" }
            pre { (SQLI_PAYLOADS) }
        }
    }
}
