use comfy_table::{Cell, ContentArrangement};
use kube::api::DynamicObject;

use crate::ext::DynamicObjectExt;

pub trait PodTableExt {
    fn render_table(&self) -> String;
}

impl PodTableExt for [DynamicObject] {
    fn render_table(&self) -> String {
        let rows = self
            .iter()
            .map(|pod| {
                [
                    Cell::new(pod.name_or_default()),
                    Cell::new(pod.phase().unwrap_or("Unknown")),
                    Cell::new(pod.container_names().join(",")),
                    Cell::new(pod.str_field(&["spec", "nodeName"]).unwrap_or_default()),
                ]
            })
            .collect::<Vec<_>>();

        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["NAME", "PHASE", "CONTAINERS", "NODE"])
            .add_rows(rows)
            .to_string()
    }
}
