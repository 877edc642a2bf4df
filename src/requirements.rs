//! Lectura de la página de requisitos de una carrera.
//!
//! Recorre encabezados `h2/h3/h4` y filas de `table`. La sección de requisito
//! vigente es un estado explícito (`current_section`) que sólo cambia al
//! cerrar un encabezado; no hay estado global entre llamadas.
//!
//! Reglas:
//! - un encabezado listado en `valid_sections` pasa a ser la sección vigente;
//! - un encabezado no listado, estando vigente `stop_after`, termina el recorrido;
//! - la primera fila de cada tabla es encabezado y se omite;
//! - de cada fila se toma el enlace de la primera celda y su parámetro `P`.

use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Clone)]
pub struct RequirementPage {
    pub valid_sections: Vec<String>,
    pub stop_after: Option<String>,
}

impl Default for RequirementPage {
    fn default() -> Self {
        RequirementPage {
            valid_sections: [
                "Lower Division Requirements",
                "Upper Division Requirements",
                "Prerequisites",
                "Upper Division Requirements (Nine Courses)",
                "Lower Division Prerequisites",
                "Principles and techniques of data science",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            stop_after: Some("Upper Division Requirements".to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct ScanState {
    current_section: Option<String>,
    heading: Option<String>,
    table_depth: usize,
    rows_in_table: usize,
    cell_in_row: usize,
    row_link: Option<String>,
}

fn tag_name(raw: &[u8]) -> Vec<u8> {
    raw.to_ascii_lowercase()
}

fn is_heading(name: &[u8]) -> bool {
    matches!(name, b"h2" | b"h3" | b"h4")
}

/// Valor del parámetro `P` de un enlace del catálogo ("/search/?P=COMPSCI%2061A").
pub fn course_code_from_href(href: &str) -> Option<String> {
    let href = href.replace("&amp;", "&");
    // relativo o absoluto: `join` resuelve ambos contra una base ficticia
    let base = url::Url::parse("http://localhost/").ok()?;
    let url = base.join(&href).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "P")
        .map(|(_, v)| v.trim().to_string())
        .filter(|code| !code.is_empty())
}

/// Extrae los códigos de curso requeridos, en orden de aparición.
pub fn parse_required_courses(html: &str, page: &RequirementPage) -> Vec<String> {
    let mut reader = Reader::from_str(html);
    reader.trim_text(true);
    reader.check_end_names(false);

    let mut st = ScanState::default();
    let mut courses = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(e.name().as_ref());
                match name.as_slice() {
                    n if is_heading(n) => st.heading = Some(String::new()),
                    b"table" => {
                        st.table_depth += 1;
                        if st.table_depth == 1 {
                            st.rows_in_table = 0;
                        }
                    }
                    b"tr" if st.table_depth > 0 => {
                        st.rows_in_table += 1;
                        st.cell_in_row = 0;
                        st.row_link = None;
                    }
                    b"td" if st.table_depth > 0 => st.cell_in_row += 1,
                    b"a" if st.table_depth > 0 && st.cell_in_row == 1 && st.row_link.is_none() => {
                        st.row_link = e
                            .html_attributes()
                            .filter_map(|a| a.ok())
                            .find(|a| a.key.as_ref().eq_ignore_ascii_case(b"href"))
                            .map(|a| String::from_utf8_lossy(&a.value).into_owned());
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(h) = st.heading.as_mut() {
                    let chunk = match t.unescape() {
                        Ok(c) => c.into_owned(),
                        Err(_) => String::from_utf8_lossy(&t).into_owned(),
                    };
                    h.push_str(&chunk);
                    h.push(' ');
                }
            }
            Ok(Event::End(e)) => {
                let name = tag_name(e.name().as_ref());
                match name.as_slice() {
                    n if is_heading(n) => {
                        let Some(text) = st.heading.take() else { continue };
                        let heading = text.split_whitespace().collect::<Vec<_>>().join(" ");
                        if page.valid_sections.iter().any(|s| *s == heading) {
                            st.current_section = Some(heading);
                        } else if st.current_section.is_some() && st.current_section == page.stop_after {
                            break;
                        }
                    }
                    b"table" => st.table_depth = st.table_depth.saturating_sub(1),
                    b"tr" if st.table_depth > 0 => {
                        let link = st.row_link.take();
                        if st.rows_in_table > 1 && st.current_section.is_some() && st.cell_in_row > 0 {
                            if let Some(code) = link.as_deref().and_then(course_code_from_href) {
                                courses.push(code);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                log::warn!("[requirements] HTML ilegible en posición {}: {}", reader.buffer_position(), e);
                break;
            }
        }
    }
    log::info!("[requirements] {} cursos requeridos encontrados", courses.len());
    courses
}
