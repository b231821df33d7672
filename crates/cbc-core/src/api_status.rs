//! CBC-CPF endpoint catalog and status panel.
//!
//! The catalog is static: five documented endpoints, all of which need an
//! OAuth2-authenticated backend proxy that this workspace does not provide.
//! `refresh` exists for parity with the panel's refresh control and checks
//! nothing.

use cbc_registry::Cpf;
use serde::Serialize;

use crate::obs;

/// Public catalog page of the API.
pub const DOCS_URL: &str = "https://www.gov.br/conecta/catalogo/apis/cadastro-base-do-cidadao-cbc-cpf";

/// Swagger/OpenAPI viewer.
pub const OPENAPI_URL: &str =
    "https://www.gov.br/conecta/catalogo/apis/cadastro-base-do-cidadao-cbc-cpf/swagger.json/swagger_view";

const PATH_PLACEHOLDER: &str = "{cpf}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointStatus {
    Available,
    RequiresAuth,
    NotImplemented,
}

impl EndpointStatus {
    /// pt-BR badge text.
    pub fn label(&self) -> &'static str {
        match self {
            EndpointStatus::Available => "Disponível",
            EndpointStatus::RequiresAuth => "Requer Autenticação",
            EndpointStatus::NotImplemented => "Não Implementado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiEndpoint {
    pub name: &'static str,
    pub path: &'static str,
    pub method: HttpMethod,
    pub description: &'static str,
    pub status: EndpointStatus,
}

impl ApiEndpoint {
    /// Path template with `{cpf}` filled in.
    pub fn resolve_path(&self, cpf: &Cpf) -> String {
        self.path.replace(PATH_PLACEHOLDER, cpf.as_str())
    }
}

pub static API_ENDPOINTS: [ApiEndpoint; 5] = [
    ApiEndpoint {
        name: "Consulta CPF Básica",
        path: "/cpf/{cpf}",
        method: HttpMethod::Get,
        description: "Consulta informações básicas do CPF",
        status: EndpointStatus::RequiresAuth,
    },
    ApiEndpoint {
        name: "Consulta CPF Completa",
        path: "/cpf/{cpf}/completo",
        method: HttpMethod::Get,
        description: "Consulta informações completas do CPF",
        status: EndpointStatus::RequiresAuth,
    },
    ApiEndpoint {
        name: "Validar CPF",
        path: "/cpf/{cpf}/validar",
        method: HttpMethod::Get,
        description: "Valida se o CPF existe e está ativo",
        status: EndpointStatus::RequiresAuth,
    },
    ApiEndpoint {
        name: "Histórico CPF",
        path: "/cpf/{cpf}/historico",
        method: HttpMethod::Get,
        description: "Consulta histórico de alterações do CPF",
        status: EndpointStatus::RequiresAuth,
    },
    ApiEndpoint {
        name: "Situação Cadastral",
        path: "/cpf/{cpf}/situacao",
        method: HttpMethod::Get,
        description: "Consulta situação cadastral atual",
        status: EndpointStatus::RequiresAuth,
    },
];

/// What a production deployment needs before the API can be called.
pub static REQUIRED_RESOURCES: [&str; 4] = [
    "Funções de backend para proxy da API",
    "Armazenamento seguro de tokens OAuth2",
    "Gerenciamento de autenticação",
    "Logs de auditoria",
];

/// JSON view of the panel.
#[derive(Debug, Clone, Serialize)]
pub struct ApiStatusReport {
    pub integration_required: bool,
    pub required_resources: &'static [&'static str],
    pub endpoints: &'static [ApiEndpoint],
    pub docs_url: &'static str,
    pub openapi_url: &'static str,
}

/// The "API Status" tab.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApiStatusPanel;

impl ApiStatusPanel {
    pub fn endpoints(&self) -> &'static [ApiEndpoint] {
        &API_ENDPOINTS
    }

    /// Refresh control. Performs no live check.
    pub fn refresh(&self) -> &'static [ApiEndpoint] {
        obs::emit_status_refresh_requested(API_ENDPOINTS.len());
        &API_ENDPOINTS
    }

    pub fn report(&self) -> ApiStatusReport {
        ApiStatusReport {
            integration_required: true,
            required_resources: &REQUIRED_RESOURCES,
            endpoints: &API_ENDPOINTS,
            docs_url: DOCS_URL,
            openapi_url: OPENAPI_URL,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Status da API CBC-CPF\n");
        out.push_str("Estado atual das funcionalidades da API do Cadastro Base do Cidadão\n\n");

        out.push_str("Configuração de Autenticação\n");
        out.push_str("  ! Integração com backend seguro necessária\n");
        out.push_str(
            "    Para consumir a API do CBC-CPF com segurança é preciso um backend que\n    \
             gerencie a autenticação OAuth2 e armazene tokens com segurança.\n",
        );
        out.push_str("    Recursos necessários:\n");
        for resource in REQUIRED_RESOURCES.iter() {
            out.push_str(&format!("      • {}\n", resource));
        }

        out.push_str("\nEndpoints da API\n");
        for ep in self.endpoints() {
            out.push_str(&format!(
                "  [{}] {:<24} {}\n",
                ep.method.as_str(),
                ep.name,
                ep.status.label()
            ));
            out.push_str(&format!("        {}\n", ep.description));
            out.push_str(&format!("        {}\n", ep.path));
        }

        out.push_str("\nDocumentação Oficial\n");
        out.push_str(&format!("  Documentação da API CBC-CPF: {}\n", DOCS_URL));
        out.push_str(&format!("  Swagger/OpenAPI Specification: {}\n", OPENAPI_URL));
        out
    }
}
