use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::avatar::ProfileCard;
use crate::config::SiteConfig;

use super::{load_photos, load_socials, measured_gallery};

// ── Gallery layout ─────────────────────────────────────

#[get("/photos?<tag>")]
pub fn photos(config: &State<SiteConfig>, tag: Option<&str>) -> Json<Value> {
    let photos = load_photos(config);
    let gallery = measured_gallery(config, &photos, tag);
    Json(json!({
        "active": gallery.active(),
        "tags": gallery.vocabulary(),
        "cells": gallery.cells(),
    }))
}

// ── Profile cards ──────────────────────────────────────

#[get("/profiles")]
pub fn profiles(config: &State<SiteConfig>) -> Json<Value> {
    let data = load_socials(config);
    let sections: Vec<Value> = data
        .sections()
        .into_iter()
        .map(|section| {
            let card = section
                .profile
                .map(|p| ProfileCard::resolve(&config.avatar_service, section.platform, p));
            json!({
                "platform": section.platform,
                "card": card,
                "posts": section.posts,
            })
        })
        .collect();
    Json(json!({ "sections": sections }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![photos, profiles]
}
