//! Server-rendered embed page for a saved map.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use map_store::MapConfiguration;
use state_data::{fill_for, find_record, state_name, ColorScale, StateRecord};

use crate::error::AppError;
use crate::state::AppState;
use crate::tiles::{label_color, GRID_COLS, GRID_ROWS, TILES};

const TILE_SIZE: u32 = 48;
const TILE_GAP: u32 = 4;
const LEGEND_STOPS: usize = 9;

/// One state's square on the map.
pub struct TileView {
    pub code: &'static str,
    pub x: u32,
    pub y: u32,
    pub center_x: u32,
    pub center_y: u32,
    pub fill: String,
    pub text_color: &'static str,
    pub label: String,
    pub tooltip: String,
}

pub struct LegendStop {
    pub offset: String,
    pub color: String,
}

#[derive(Template)]
#[template(path = "embed.html")]
pub struct EmbedTemplate {
    pub title: String,
    pub show_labels: bool,
    pub tile_size: u32,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileView>,
    pub legend_title: String,
    pub legend_min_label: String,
    pub legend_max_label: String,
    pub legend: Vec<LegendStop>,
}

#[derive(Template)]
#[template(path = "embed_error.html")]
pub struct EmbedErrorTemplate {
    pub message: String,
}

impl EmbedTemplate {
    pub fn from_map(saved: &MapConfiguration) -> Self {
        let map = &saved.map;
        let scale = ColorScale::for_records(map.color_scheme, &map.state_data);
        let step = TILE_SIZE + TILE_GAP;

        let tiles = TILES
            .iter()
            .map(|tile| {
                let record = find_record(&map.state_data, tile.code);
                let fill = fill_for(tile.code, &map.state_data, &map.custom_colors, &scale);
                let x = tile.col * step;
                let y = tile.row * step;
                TileView {
                    code: tile.code,
                    x,
                    y,
                    center_x: x + TILE_SIZE / 2,
                    center_y: y + TILE_SIZE / 2,
                    text_color: label_color(&fill),
                    fill,
                    label: record
                        .and_then(|r| r.label.clone())
                        .unwrap_or_else(|| tile.code.to_string()),
                    tooltip: tooltip(tile.code, record),
                }
            })
            .collect();

        let legend = scale
            .legend_stops(LEGEND_STOPS)
            .into_iter()
            .map(|(offset, color)| LegendStop {
                offset: format!("{:.0}%", offset),
                color,
            })
            .collect();

        Self {
            title: map.title.clone(),
            show_labels: map.show_labels,
            tile_size: TILE_SIZE,
            width: GRID_COLS * step,
            height: GRID_ROWS * step,
            tiles,
            legend_title: map.legend_title.clone(),
            legend_min_label: map.legend_min_label.clone(),
            legend_max_label: map.legend_max_label.clone(),
            legend,
        }
    }
}

fn tooltip(code: &str, record: Option<&StateRecord>) -> String {
    let name = state_name(code).unwrap_or(code);
    let Some(record) = record else {
        return format!("{}: No data", name);
    };

    let mut lines = vec![match record.value {
        Some(value) => format!("{}: {}", name, format_value(value)),
        None => format!("{}: No value", name),
    }];
    lines.extend(record.label.clone());
    lines.extend(record.info.clone());
    lines.join("\n")
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// `GET /embed/:id`
pub async fn embed_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Ok(saved) => EmbedTemplate::from_map(&saved).into_response(),
        Err(err) => {
            let (status, message) = AppError::from(err).status_and_message();
            (status, EmbedErrorTemplate { message }).into_response()
        }
    }
}
