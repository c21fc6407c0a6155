//! The fixed content of the mini-project report.
//!
//! Chapter texts use `\n` for line breaks; an empty line separates paragraphs.

use crate::config::AssetMapping;

/// Running title printed in the header of every page after the cover.
pub const RUNNING_TITLE: &str =
    "Application Web de Gestion d'un Centre de Formation - Rapport Academique";

pub const COVER_TITLE: &str = "RAPPORT DE MINI-PROJET";
pub const COVER_SUBTITLE: &str = "Application Web de Gestion d'un Centre de Formation";
pub const COVER_CONTEXT: &str = "Realise dans le cadre de la formation d'Ingenieur";
pub const COVER_AUTHOR: &str = "Presente par: [Votre Nom]";
pub const COVER_SUPERVISOR: &str = "Encadre par: [Nom de l'encadrant]";
pub const COVER_ACADEMIC_YEAR: &str = "Annee Universitaire: 2025-2026";

pub const TOC_TITLE: &str = "Table des Matieres";

/// A diagram or screenshot staged into the working directory under `file_name`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Figure {
    pub file_name: &'static str,
    pub caption: &'static str,
}

/// A numbered chapter. Its figures follow the body; every figure after the first starts a new
/// page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chapter {
    pub number: u32,
    pub title: &'static str,
    pub body: &'static str,
    pub figures: &'static [Figure],
}

pub const USE_CASE_DIAGRAM: Figure = Figure {
    file_name: "use_case_diagram.png",
    caption: "Diagramme de cas d'utilisation",
};

pub const CLASS_DIAGRAM: Figure = Figure {
    file_name: "class_diagram.png",
    caption: "Diagramme de classes",
};

pub const SEQUENCE_DIAGRAM: Figure = Figure {
    file_name: "sequence_diagram_enrollment.png",
    caption: "Diagramme de sequence - Inscription",
};

pub const COMPONENT_DIAGRAM: Figure = Figure {
    file_name: "component_diagram_ssr_csr.png",
    caption: "Diagramme de composants",
};

pub const DASHBOARD_MOCKUP: Figure = Figure {
    file_name: "dashboard_mockup.png",
    caption: "Tableau de bord de gestion (SSR/Thymeleaf)",
};

/// All figures in document order.
pub const FIGURES: [Figure; 5] = [
    USE_CASE_DIAGRAM,
    CLASS_DIAGRAM,
    SEQUENCE_DIAGRAM,
    COMPONENT_DIAGRAM,
    DASHBOARD_MOCKUP,
];

const SOURCE_ROOT: &str =
    "C:/Users/ranim/.gemini/antigravity/brain/04549280-432c-4164-9bf0-b1398731b7c8";

/// Source file of each figure in the environment the report was authored in.
const DEFAULT_SOURCES: [(&str, &str); 5] = [
    ("use_case_diagram.png", "use_case_diagram_1769024844946.png"),
    ("class_diagram.png", "class_diagram_1769024888139.png"),
    (
        "sequence_diagram_enrollment.png",
        "sequence_diagram_enrollment_1769024916226.png",
    ),
    (
        "component_diagram_ssr_csr.png",
        "component_diagram_ssr_csr_1769024952310.png",
    ),
    ("dashboard_mockup.png", "dashboard_mockup_1769024977714.png"),
];

/// The five figure mappings used when no override is given.
pub fn default_asset_mappings() -> Vec<AssetMapping> {
    DEFAULT_SOURCES
        .iter()
        .map(|(name, file)| AssetMapping::new(*name, format!("{}/{}", SOURCE_ROOT, file)))
        .collect()
}

const INTRODUCTION: &str = "\
Le projet 'Application web de gestion d'un centre de formation' s'inscrit dans une demarche de modernisation \
des outils de gestion pedagogique au sein d'une ecole d'ingenieurs. L'objectif est de centraliser \
toutes les informations relatives au cycle de vie d'une formation, de l'inscription des etudiants \
jusqu'a la validation des acquis par le biais de rapports de notes.\n\n\
Objectifs pedagogiques :\n\
- Maitriser l'ecosysteme Spring Boot pour le developpement backend.\n\
- Comprendre l'architecture en couches et les principes de l'injection de dependances.\n\
- Mettre en oeuvre une securite robuste basee sur les roles.\n\
- Allier le rendu cote serveur (SSR) via Thymeleaf pour l'administration et le rendu cote client (CSR) pour une experience utilisateur fluide.\n\n\
Interet de l'architecture Spring Boot :\n\
Spring Boot offre une configuration simplifiee (auto-configuration), une gestion efficace de la persistance avec Spring Data JPA, \
et une integration facilitee de modules de securite. Sa modularite permet d'exposer des API REST tout en \
servant des vues classiques, repondant ainsi aux besoins hybrides du projet.";

const REQUIREMENTS: &str = "\
L'application doit repondre aux besoins de trois types d'acteurs principaux :\n\n\
1. Administrateur (ADMIN) :\n\
- Gestion du catalogue de formations (cours, sessions).\n\
- Gestion des comptes utilisateurs (etudiants, formateurs).\n\
- Affectation des formateurs aux cours.\n\
- Surveillance globale des activites du centre.\n\n\
2. Formateur (FORMATEUR) :\n\
- Consultation de son emploi du temps.\n\
- Saisie des notes pour les etudiants inscrits a ses cours.\n\
- Gestion des supports pedagogiques.\n\n\
3. Etudiant (ETUDIANT) :\n\
- Inscription aux sessions de cours disponibles.\n\
- Consultation de son emploi du temps personnalise.\n\
- Acces a ses notes et telechargement du releve officiel.\n\n\
Contraintes techniques :\n\
- Securite JWT pour les API REST.\n\
- Base de donnees relationnelle MySQL.\n\
- Interface responsive utilisant Bootstrap.\n\
- Disponibilite d'un systeme de notification par email.";

const ARCHITECTURE: &str = "\
L'application repose sur une architecture multi-couches standardisee, optimisee pour la maintenabilite et l'evolutivite.\n\n\
Architecture logique en couches :\n\
- Couche Web (Controller) : Traite les requetes HTTP, gere les entrees utilisateur et delegue les traitements a la couche service.\n\
- Couche Service (Business Logic) : Contient la logique metier, les validations complexes et la gestion des transactions.\n\
- Couche Persistance (Repository) : Interagit avec la base de donnees via Spring Data JPA.\n\
- Base de donnees : Stockage persistant sous MySQL.\n\n\
Role de Spring IoC et de l'injection de dependances :\n\
Le conteneur IoC (Inversion of Control) de Spring gere le cycle de vie des composants (Beans). L'injection de dependances \
permet de decoupler les couches. Par exemple, un contrôleur ne cree pas ses propres instances de services, \
mais les reçoit via son constructeur, ce qui facilite les tests unitaires.\n\n\
Gestion des profils (dev / prod) :\n\
L'utilisation des profils Spring permet de configurer des environnements distincts. En developpement, \
une base de donnees locale (ou H2) peut être utilisee avec une journalisation detaillee, tandis qu'en production, \
une instance MySQL configuree avec des parametres de securite stricts est privilegiee.";

const UML_DESIGN: &str =
    "La phase de conception a permis de modeliser les interactions et les structures de donnees.";

const IMPLEMENTATION: &str = "\
Technologies utilisees :\n\
- Backend : Spring Boot 3.4, Spring Data JPA, Hibernate, Spring Security.\n\
- Frontend : Thymeleaf (SSR), Bootstrap 5, Angular/React (CSR).\n\
- Base de donnees : MySQL 8.0.\n\
- Gestion de versions de BD : Liquibase.\n\n\
Description des entites et relations ORM :\n\
Le modele de donnees est centre sur l'entite User, declinee en Student et Trainer via un heritage ou des jointures. \
La relation entre Student et Course est geree par l'entite Enrollment, permettant de stocker la date d'inscription. \
Les notes (Grade) sont liees a la fois a un etudiant et a un cours.\n\n\
Exposition des API REST :\n\
Les API REST sont exposees via des RestControllers, retournant des DTO (Data Transfer Objects) \
pour eviter les cycles dans le JSON et securiser les transferts de donnees sensibles.";

const SECURITY: &str = "\
La securite est un pilier de l'application. Elle est implementee avec Spring Security 6.\n\n\
Authentification :\n\
Pour les parties SSR, l'authentification se fait via un formulaire classique avec gestion de session. \
Pour les parties CSR, un système JWT (JSON Web Token) est mis en place, permettant une authentification stateless \
adaptee aux clients modernes.\n\n\
Autorisation par roles :\n\
- ROLE_ADMIN : Acces total aux interfaces de gestion.\n\
- ROLE_FORMATEUR : Acces restreint a ses cours et a la saisie des notes.\n\
- ROLE_ETUDIANT : Acces a ses inscriptions et a ses resultats uniquement.\n\n\
Gestion du profil utilisateur :\n\
Chaque utilisateur peut mettre a jour ses informations personnelles et changer son mot de passe, \
lequel est stocke sous forme de hachage BCrypt en base de donnees.";

const REPORTING: &str = "\
Le systeme integre des fonctionnalites de calcul et de reporting pour faciliter le suivi pedagogique.\n\n\
Calcul des moyennes :\n\
Un service dedie parcourt les notes d'un etudiant pour calculer sa moyenne generale ponderee ou simple. \
Des statistiques par cours sont egalement generees (taux de reussite, ecart-type).\n\n\
Generation de rapports PDF :\n\
Grâce a iText, l'application genere dynamiquement des releves de notes au format PDF. Ces documents \
sont formates de maniere professionnelle, incluant le logo du centre et un recapitulatif clair des resultats.\n\n\
Notifications par email :\n\
L'integration de Spring Mail permet d'envoyer des notifications automatiques (confirmation d'inscription, \
alerte en cas de nouvelle note publiee, rappel de session).";

const RESULTS: &str = "\
Les interfaces ont ete concues pour être intuitives. La partie administration (Thymeleaf) privilegie \
l'efficacite operationnelle, tandis que le tableau de bord etudiant mise sur la clarte visuelle.\n\n\
Voici un aperçu du tableau de bord principal :";

const CONCLUSION: &str = "\
Ce projet a permis de concretiser les concepts theoriques du developpement web with Spring Boot. \
L'application est fonctionnelle et repond aux exigences initiales de gestion d'un centre de formation.\n\n\
Bilan du travail realise :\n\
- Mise en place d'une architecture solide et securisee.\n\
- Developpement d'une interface hybride SSR/CSR.\n\
- Automatisation du reporting par PDF.\n\n\
Limites du projet :\n\
- Absence d'un module de paiement pour les inscriptions.\n\
- Manque de gestion multi-filiales.\n\n\
Ameliorations futures :\n\
- Ajout d'une application mobile hybride utilisant les API REST.\n\
- Integration d'un module de visioconference pour les cours a distance.\n\
- Mise en place d'analyse predictive sur les performances des etudiants (IA).";

const UML_FIGURES: [Figure; 4] = [
    USE_CASE_DIAGRAM,
    CLASS_DIAGRAM,
    SEQUENCE_DIAGRAM,
    COMPONENT_DIAGRAM,
];

const DASHBOARD_FIGURES: [Figure; 1] = [DASHBOARD_MOCKUP];

pub const CHAPTERS: [Chapter; 9] = [
    Chapter {
        number: 1,
        title: "Introduction",
        body: INTRODUCTION,
        figures: &[],
    },
    Chapter {
        number: 2,
        title: "Analyse et specification des besoins",
        body: REQUIREMENTS,
        figures: &[],
    },
    Chapter {
        number: 3,
        title: "Architecture de la solution",
        body: ARCHITECTURE,
        figures: &[],
    },
    Chapter {
        number: 4,
        title: "Conception UML",
        body: UML_DESIGN,
        figures: &UML_FIGURES,
    },
    Chapter {
        number: 5,
        title: "Implementation",
        body: IMPLEMENTATION,
        figures: &[],
    },
    Chapter {
        number: 6,
        title: "Securite et gestion des roles",
        body: SECURITY,
        figures: &[],
    },
    Chapter {
        number: 7,
        title: "Reporting et fonctionnalites avancees",
        body: REPORTING,
        figures: &[],
    },
    Chapter {
        number: 8,
        title: "Resultats et captures",
        body: RESULTS,
        figures: &DASHBOARD_FIGURES,
    },
    Chapter {
        number: 9,
        title: "Conclusion et perspectives",
        body: CONCLUSION,
        figures: &[],
    },
];
