use hairpin_dns_application::use_cases::{HandleDnsQueryUseCase, RewriteAddressUseCase};
use hairpin_dns_domain::Config;
use hairpin_dns_infrastructure::dns::{
    DnsForwarder, Downstream, FailureHandler, ForwardingHandler, HairpinRequestHandler,
    ResponseBuilder,
};
use hairpin_dns_infrastructure::service_directory::{KubeClientConfig, KubernetesServiceDirectory};
use hairpin_dns_infrastructure::system::SystemAddressResolver;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub type DnsHandler = HairpinRequestHandler<Downstream>;

pub struct DnsServices {
    pub handler: DnsHandler,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let timeout = config.dns.query_deadline();

        let directory = Self::build_directory(config)?;
        let rewriter = Arc::new(RewriteAddressUseCase::new(
            directory,
            config.directory.namespace.as_str(),
            timeout,
        ));

        let use_case = Arc::new(
            HandleDnsQueryUseCase::new(Arc::new(SystemAddressResolver::new()), rewriter, timeout)
                .with_selection(config.dns.address_selection),
        );

        let downstream = Self::build_downstream(config)?;
        let handler = HairpinRequestHandler::new(
            use_case,
            ResponseBuilder::new(config.dns.answer_ttl),
            downstream,
        );

        info!(
            namespace = %config.directory.namespace,
            selection = config.dns.address_selection.as_str(),
            ttl = config.dns.answer_ttl,
            "DNS services initialized"
        );

        Ok(Self { handler })
    }

    fn build_directory(config: &Config) -> anyhow::Result<Arc<KubernetesServiceDirectory>> {
        let kube = KubeClientConfig::from_directory_config(&config.directory)?;
        info!(api_server = %kube.api_server, "Using Kubernetes API server");
        Ok(Arc::new(KubernetesServiceDirectory::from_config(&kube)?))
    }

    fn build_downstream(config: &Config) -> anyhow::Result<Downstream> {
        if config.dns.upstream_servers.is_empty() {
            info!("No upstream servers configured, declined queries get SERVFAIL");
            return Ok(Downstream::Fail(FailureHandler));
        }

        let upstreams = config
            .dns
            .upstream_servers
            .iter()
            .map(|s| s.parse::<SocketAddr>())
            .collect::<Result<Vec<_>, _>>()?;

        info!(upstreams = ?upstreams, "Forwarding declined queries");
        Ok(Downstream::Forward(ForwardingHandler::new(Arc::new(
            DnsForwarder::new(&upstreams, config.dns.query_deadline()),
        ))))
    }
}
