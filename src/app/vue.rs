// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - La vue ne fait qu’afficher + relayer des `Bouton` : aucune logique de calcul ici
// - Tactile : gros boutons, grille fixe

use eframe::egui;

use super::etat::{ActionMemoire, AppCalc, Bouton};
use crate::noyau::espace::Constante;
use crate::noyau::format_nombre;

const TAILLE_BOUTON: [f32; 2] = [56.0, 34.0];

/// Pavé : (libellé, bouton). Une ligne = une rangée de la grille.
const PAVE: [[Option<(&str, Bouton)>; 5]; 10] = [
    [
        Some(("MC", Bouton::Memoire(ActionMemoire::Effacer))),
        Some(("MR", Bouton::Memoire(ActionMemoire::Rappeler))),
        Some(("M+", Bouton::Memoire(ActionMemoire::Ajouter))),
        Some(("M−", Bouton::Memoire(ActionMemoire::Soustraire))),
        Some(("C", Bouton::Effacer)),
    ],
    [
        Some(("sin", Bouton::Fonction("sin"))),
        Some(("cos", Bouton::Fonction("cos"))),
        Some(("tan", Bouton::Fonction("tan"))),
        Some(("π", Bouton::Constante(Constante::Pi))),
        Some(("ℯ", Bouton::Constante(Constante::E))),
    ],
    [
        Some(("asin", Bouton::Fonction("asin"))),
        Some(("acos", Bouton::Fonction("acos"))),
        Some(("atan", Bouton::Fonction("atan"))),
        Some(("ln", Bouton::Fonction("ln"))),
        Some(("log", Bouton::Fonction("log"))),
    ],
    [
        Some(("sinh", Bouton::Fonction("sinh"))),
        Some(("cosh", Bouton::Fonction("cosh"))),
        Some(("tanh", Bouton::Fonction("tanh"))),
        Some(("√", Bouton::Fonction("sqrt"))),
        Some(("∛", Bouton::Fonction("cbrt"))),
    ],
    [
        Some(("|x|", Bouton::Fonction("abs"))),
        Some(("exp", Bouton::Fonction("exp"))),
        Some(("x!", Bouton::Fonction("factorial"))),
        Some(("%", Bouton::Valeur("%"))),
        Some(("^", Bouton::Operateur("^"))),
    ],
    [
        Some(("(", Bouton::Valeur("("))),
        Some((")", Bouton::Valeur(")"))),
        Some(("Ans", Bouton::Valeur("Ans"))),
        Some(("DEL", Bouton::Supprimer)),
        Some(("÷", Bouton::Operateur("/"))),
    ],
    [
        Some(("7", Bouton::Valeur("7"))),
        Some(("8", Bouton::Valeur("8"))),
        Some(("9", Bouton::Valeur("9"))),
        Some(("×", Bouton::Operateur("*"))),
        None,
    ],
    [
        Some(("4", Bouton::Valeur("4"))),
        Some(("5", Bouton::Valeur("5"))),
        Some(("6", Bouton::Valeur("6"))),
        Some(("−", Bouton::Operateur("-"))),
        None,
    ],
    [
        Some(("1", Bouton::Valeur("1"))),
        Some(("2", Bouton::Valeur("2"))),
        Some(("3", Bouton::Valeur("3"))),
        Some(("+", Bouton::Operateur("+"))),
        None,
    ],
    [
        Some(("0", Bouton::Valeur("0"))),
        Some((".", Bouton::Valeur("."))),
        Some(("=", Bouton::Egal)),
        None,
        None,
    ],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(crate::TITRE_APP);
                ui.add_space(6.0);

                self.ui_bandeau(ui);

                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    /// Mode d’angle + indicateur mémoire.
    fn ui_bandeau(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let resp = ui
                .add_sized(
                    [96.0, 28.0],
                    egui::Button::new(format!("Mode: {}", self.mode_angle.libelle())),
                )
                .on_hover_text("Bascule radians / degrés");
            if resp.clicked() {
                self.basculer_mode_angle();
            }

            ui.separator();

            if self.memoire_active() {
                ui.strong("M");
            } else {
                ui.weak("–");
            }
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        let expression = if self.expression.is_empty() {
            "0"
        } else {
            self.expression.as_str()
        };
        Self::champ_monospace(ui, "ecran_expression", expression, 1);
        Self::champ_monospace(ui, "ecran_resultat", &self.resultat, 1);
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE.iter() {
                    for case in rangee.iter() {
                        match case {
                            Some((libelle, bouton)) => self.bouton(ui, libelle, *bouton),
                            None => {
                                ui.label("");
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if ui.button("Effacer l’historique").clicked() {
                    self.vider_historique();
                }

                // rappel différé : on ne mute pas `historique` pendant qu’on l’itère
                let mut rappel: Option<usize> = None;
                for (i, h) in self.historique.iter().enumerate() {
                    let texte = format!("{}  =  {}", h.expression, format_nombre(h.valeur));
                    if ui.button(texte).clicked() {
                        rappel = Some(i);
                    }
                }
                if let Some(i) = rappel {
                    self.rappeler_historique(i);
                }
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, libelle: &str, bouton: Bouton) {
        let resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(libelle));
        if resp.clicked() {
            self.appuyer(bouton);
        }
    }
}
