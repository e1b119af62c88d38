//! UI message catalog.
//!
//! One static [`Messages`] table per [`Locale`]. Every string a template
//! shows comes from here, so a missing translation is a compile error
//! rather than a blank on the page.

use assistra_core::Locale;

/// A consulting service offered on the services page.
#[derive(Debug, Clone, Copy)]
pub struct ServiceItem {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every UI string for one locale.
#[derive(Debug)]
pub struct Messages {
    pub site_name: &'static str,
    pub language_name: &'static str,
    pub switch_language: &'static str,

    pub nav_home: &'static str,
    pub nav_about: &'static str,
    pub nav_services: &'static str,
    pub nav_store: &'static str,
    pub nav_blog: &'static str,

    pub home_title: &'static str,
    pub home_tagline: &'static str,
    pub home_cta: &'static str,

    pub about_title: &'static str,
    pub about_paragraphs: &'static [&'static str],

    pub services_title: &'static str,
    pub services_intro: &'static str,
    pub services: &'static [ServiceItem],

    pub store_title: &'static str,
    pub store_empty: &'static str,
    pub store_buy: &'static str,
    pub store_price_on_request: &'static str,

    pub blog_title: &'static str,
    pub blog_empty: &'static str,
    pub blog_by: &'static str,
    pub blog_back: &'static str,
    pub blog_read_more: &'static str,

    pub newsletter_title: &'static str,
    pub newsletter_placeholder: &'static str,
    pub newsletter_submit: &'static str,
    pub newsletter_success: &'static str,
    pub newsletter_invalid_email: &'static str,
    pub newsletter_unavailable: &'static str,
    pub newsletter_failed: &'static str,

    pub not_found_title: &'static str,
    pub not_found_body: &'static str,

    pub footer_rights: &'static str,
}

/// Portuguese (default).
pub static PT: Messages = Messages {
    site_name: "Assistra",
    language_name: "Português",
    switch_language: "English",

    nav_home: "Início",
    nav_about: "Sobre",
    nav_services: "Serviços",
    nav_store: "Loja",
    nav_blog: "Blog",

    home_title: "Assistência executiva remota para quem precisa de tempo",
    home_tagline: "Organizamos sua agenda, seus e-mails e suas viagens para você focar no que importa.",
    home_cta: "Conheça nossos serviços",

    about_title: "Sobre a Assistra",
    about_paragraphs: &[
        "A Assistra nasceu para ajudar profissionais e pequenas empresas a delegar o trabalho administrativo do dia a dia.",
        "Nossa equipe de assistentes trabalha remotamente, em português e inglês, com processos claros e comunicação direta.",
    ],

    services_title: "Serviços",
    services_intro: "Planos sob medida para a rotina de cada cliente.",
    services: &[
        ServiceItem {
            name: "Gestão de agenda",
            description: "Marcação de reuniões, lembretes e organização de compromissos.",
        },
        ServiceItem {
            name: "Caixa de entrada",
            description: "Triagem diária de e-mails e respostas de rotina.",
        },
        ServiceItem {
            name: "Viagens",
            description: "Pesquisa, reservas e roteiros completos.",
        },
        ServiceItem {
            name: "Consultoria de processos",
            description: "Mapeamento das tarefas que podem ser delegadas.",
        },
    ],

    store_title: "Loja",
    store_empty: "Nenhum produto disponível no momento.",
    store_buy: "Comprar",
    store_price_on_request: "Preço sob consulta",

    blog_title: "Blog",
    blog_empty: "Nenhum artigo publicado ainda.",
    blog_by: "por",
    blog_back: "Voltar ao blog",
    blog_read_more: "Ler artigo",

    newsletter_title: "Receba nossas dicas por e-mail",
    newsletter_placeholder: "seu@email.com",
    newsletter_submit: "Inscrever",
    newsletter_success: "Inscrição realizada! Confira sua caixa de entrada.",
    newsletter_invalid_email: "Informe um e-mail válido.",
    newsletter_unavailable: "A newsletter está indisponível no momento.",
    newsletter_failed: "Não foi possível concluir a inscrição. Tente novamente.",

    not_found_title: "Página não encontrada",
    not_found_body: "O endereço que você procura não existe ou foi removido.",

    footer_rights: "Todos os direitos reservados.",
};

/// English.
pub static EN: Messages = Messages {
    site_name: "Assistra",
    language_name: "English",
    switch_language: "Português",

    nav_home: "Home",
    nav_about: "About",
    nav_services: "Services",
    nav_store: "Store",
    nav_blog: "Blog",

    home_title: "Remote executive assistance for people short on time",
    home_tagline: "We run your calendar, inbox and travel so you can focus on what matters.",
    home_cta: "See our services",

    about_title: "About Assistra",
    about_paragraphs: &[
        "Assistra helps professionals and small businesses hand off their day-to-day admin work.",
        "Our assistants work remotely, in Portuguese and English, with clear processes and direct communication.",
    ],

    services_title: "Services",
    services_intro: "Plans tailored to each client's routine.",
    services: &[
        ServiceItem {
            name: "Calendar management",
            description: "Meeting scheduling, reminders and keeping your week in order.",
        },
        ServiceItem {
            name: "Inbox",
            description: "Daily email triage and routine replies.",
        },
        ServiceItem {
            name: "Travel",
            description: "Research, bookings and complete itineraries.",
        },
        ServiceItem {
            name: "Process consulting",
            description: "Mapping out which tasks can be delegated.",
        },
    ],

    store_title: "Store",
    store_empty: "No products available right now.",
    store_buy: "Buy",
    store_price_on_request: "Price on request",

    blog_title: "Blog",
    blog_empty: "No articles published yet.",
    blog_by: "by",
    blog_back: "Back to the blog",
    blog_read_more: "Read article",

    newsletter_title: "Get our tips by email",
    newsletter_placeholder: "you@email.com",
    newsletter_submit: "Subscribe",
    newsletter_success: "You're subscribed! Check your inbox.",
    newsletter_invalid_email: "Please enter a valid email address.",
    newsletter_unavailable: "The newsletter is unavailable right now.",
    newsletter_failed: "We couldn't complete your signup. Please try again.",

    not_found_title: "Page not found",
    not_found_body: "The page you are looking for does not exist or was removed.",

    footer_rights: "All rights reserved.",
};

/// Messages for `locale`.
#[must_use]
pub fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::Pt => &PT,
        Locale::En => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_differ_per_locale() {
        assert_eq!(messages(Locale::Pt).nav_about, "Sobre");
        assert_eq!(messages(Locale::En).nav_about, "About");
    }

    #[test]
    fn test_switch_language_names_the_other_locale() {
        for locale in Locale::ALL {
            assert_eq!(
                messages(locale).switch_language,
                messages(locale.alternate()).language_name
            );
        }
    }

    #[test]
    fn test_service_catalogs_line_up() {
        assert_eq!(PT.services.len(), EN.services.len());
        assert_eq!(PT.about_paragraphs.len(), EN.about_paragraphs.len());
    }
}
