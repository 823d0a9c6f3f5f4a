//! Tests for [`Generator`], resource grouping, and module output.

use pretty_assertions::assert_eq;

use crate::{
    codegen::{
        Code, Generator, GeneratorConfig, SynthesisError, group,
        ruby::{RubyIndex, RubyModule},
    },
    error::GenerateError,
    inflect::English,
    ir::IrSpec,
    parse::Document,
    tests::assert_matches,
};

const WEBHOOKS: &str = indoc::indoc! {"
    openapi: 3.0.3
    info: {title: GitHub v3 REST API, version: '1.1.4'}
    paths:
      /orgs/{org}/hooks:
        get:
          summary: List organization webhooks
          operationId: orgs/list-webhooks
          tags: [orgs]
          externalDocs:
            url: https://docs.github.com/rest/orgs/webhooks#list-organization-webhooks
          parameters:
            - {name: org, in: path, required: true, schema: {type: string}}
            - {name: per_page, in: query, schema: {type: integer}}
          responses:
            '200':
              description: Response
              content:
                application/json:
                  schema: {type: array, items: {type: object}}
      /gists:
        get:
          summary: List gists for the authenticated user
          operationId: gists/list
          tags: [gists]
          responses:
            '200':
              description: Response
      /repos/{owner}/{repo}/hooks/{hook_id}:
        delete:
          summary: Delete a repository webhook
          operationId: repos/delete-webhook
          tags: [repos]
          externalDocs:
            url: https://docs.github.com/rest/repos/webhooks#delete-a-repository-webhook
          parameters:
            - {name: owner, in: path, required: true, schema: {type: string}}
            - {name: repo, in: path, required: true, schema: {type: string}}
            - {name: hook_id, in: path, required: true, schema: {type: integer}}
          responses:
            '204':
              description: Response
      /repos/{owner}/{repo}/hooks:
        get:
          summary: List repository webhooks
          operationId: repos/list-webhooks
          tags: [repos]
          externalDocs:
            url: https://docs.github.com/rest/repos/webhooks#list-repository-webhooks
          parameters:
            - {name: owner, in: path, required: true, schema: {type: string}}
            - {name: repo, in: path, required: true, schema: {type: string}}
            - {name: per_page, in: query, schema: {type: integer}}
          responses:
            '200':
              description: Response
              content:
                application/json:
                  schema: {type: array, items: {type: object}}
        head:
          summary: Check repository webhooks
          operationId: repos/check-webhooks
          tags: [repos]
          externalDocs:
            url: https://docs.github.com/rest/repos/webhooks
          responses:
            '200':
              description: Response
      /repos/{owner}/{repo}/labels:
        get:
          summary: List labels for a repository
          operationId: issues/list-labels
          tags: [issues]
          externalDocs:
            url: https://docs.github.com/rest/issues/labels#list-labels-for-a-repository
          parameters:
            - {name: owner, in: path, required: true, schema: {type: string}}
            - {name: repo, in: path, required: true, schema: {type: string}}
          responses:
            '200':
              description: Response
              content:
                application/json:
                  schema: {type: array, items: {type: object}}
"};

// MARK: Grouping

#[test]
fn test_groups_supported_resources() {
    let doc = Document::from_yaml(WEBHOOKS).unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();

    let groups = group(&ir);

    assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["hooks", "labels"]);
    assert_eq!(
        groups["hooks"]
            .iter()
            .map(|endpoint| endpoint.operation_id)
            .collect::<Vec<_>>(),
        [
            "orgs/list-webhooks",
            "repos/delete-webhook",
            "repos/list-webhooks",
            "repos/check-webhooks",
        ]
    );
}

// MARK: Ordering

#[test]
fn test_orders_endpoints_by_priority() {
    let doc = Document::from_yaml(WEBHOOKS).unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();

    let modules = Generator::new(GeneratorConfig::default(), &English)
        .generate(&ir)
        .unwrap();

    assert_eq!(
        modules
            .iter()
            .map(|module| module.resource.as_str())
            .collect::<Vec<_>>(),
        ["hooks", "labels"]
    );
    let hooks = &modules[0];
    assert_eq!(
        hooks
            .endpoints
            .iter()
            .map(|endpoint| endpoint.method.name.as_str())
            .collect::<Vec<_>>(),
        ["webhooks", "delete_webhook", "org_webhooks"]
    );
    assert_eq!(hooks.docs_url, "https://docs.github.com/rest/repos/webhooks");
}

#[test]
fn test_ordering_is_stable_for_equal_priorities() {
    let doc = Document::from_yaml(indoc::indoc! {"
        openapi: 3.0.3
        info: {title: GitHub, version: '1'}
        paths:
          /repos/{owner}/{repo}/releases/latest:
            get:
              summary: Get the latest release
              operationId: repos/get-latest-release
              tags: [repos]
              externalDocs:
                url: https://docs.github.com/rest/releases/releases#get-the-latest-release
              responses:
                '200':
                  description: Response
          /repos/{owner}/{repo}/releases/generate-notes:
            post:
              summary: Generate release notes content for a release
              operationId: repos/generate-release-notes
              tags: [repos]
              externalDocs:
                url: https://docs.github.com/rest/releases/releases#generate-release-notes-content-for-a-release
              responses:
                '200':
                  description: Response
          /repos/{owner}/{repo}/releases/{release_id}:
            get:
              summary: Get a release
              operationId: repos/get-release
              tags: [repos]
              externalDocs:
                url: https://docs.github.com/rest/releases/releases#get-a-release
              responses:
                '200':
                  description: Response
    "})
    .unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();

    let modules = Generator::new(GeneratorConfig::default(), &English)
        .generate(&ir)
        .unwrap();

    assert_eq!(
        modules[0]
            .endpoints
            .iter()
            .map(|endpoint| endpoint.method.name.as_str())
            .collect::<Vec<_>>(),
        ["latest_release", "release", "generate_release_notes"]
    );
}

#[test]
fn test_primary_tag_sorts_first() {
    let doc = Document::from_yaml(indoc::indoc! {"
        openapi: 3.0.3
        info: {title: GitHub, version: '1'}
        paths:
          /repos/{owner}/{repo}/issues/{issue_number}/labels:
            get:
              summary: List labels for an issue
              operationId: issues/list-labels-on-issue
              tags: [issues]
              externalDocs:
                url: https://docs.github.com/rest/issues/labels#list-labels-for-an-issue
              responses:
                '200':
                  description: Response
                  content:
                    application/json:
                      schema: {type: array}
          /repos/{owner}/{repo}/issues/{issue_number}/events:
            get:
              summary: List issue events
              operationId: repos/list-issue-events
              tags: [repos]
              externalDocs:
                url: https://docs.github.com/rest/issues/events#list-issue-events
              responses:
                '200':
                  description: Response
                  content:
                    application/json:
                      schema: {type: array}
    "})
    .unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();

    let modules = Generator::new(GeneratorConfig::default(), &English)
        .generate(&ir)
        .unwrap();

    assert_eq!(
        modules[0]
            .endpoints
            .iter()
            .map(|endpoint| endpoint.namespace.as_str())
            .collect::<Vec<_>>(),
        ["issue_events", "issue_labels"]
    );
}

// MARK: Round trip

#[test]
fn test_labels_round_trip() {
    let doc = Document::from_yaml(WEBHOOKS).unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();

    let modules = Generator::new(GeneratorConfig::default(), &English)
        .generate(&ir)
        .unwrap();

    let labels = &modules[1];
    assert_eq!(labels.resource, "labels");
    assert_eq!(labels.endpoints[0].namespace, "labels");
    assert_eq!(labels.endpoints[0].method.name, "labels");
}

// MARK: Defects

#[test]
fn test_defects_stop_the_run() {
    let doc = Document::from_yaml(indoc::indoc! {"
        openapi: 3.0.3
        info: {title: GitHub, version: '1'}
        paths:
          /repos/{owner}/{repo}/hooks:
            get:
              summary: List repository webhooks
              operationId: repos/list-webhooks
              tags: [repos]
              responses:
                '200':
                  description: Response
    "})
    .unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();

    let result = Generator::new(GeneratorConfig::default(), &English).generate(&ir);

    assert_matches!(
        result,
        Err(GenerateError::Synthesis {
            operation_id,
            source: SynthesisError::MissingDocsUrl,
        }) if operation_id == "repos/list-webhooks",
    );
}

#[test]
fn test_resource_without_methods_has_no_module() {
    let doc = Document::from_yaml(indoc::indoc! {"
        openapi: 3.0.3
        info: {title: GitHub, version: '1'}
        paths:
          /repos/{owner}/{repo}/hooks:
            head:
              summary: Check repository webhooks
              operationId: repos/check-webhooks
              tags: [repos]
              responses:
                '200':
                  description: Response
    "})
    .unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();

    let modules = Generator::new(GeneratorConfig::default(), &English)
        .generate(&ir)
        .unwrap();

    assert!(modules.is_empty());
}

// MARK: Output

#[test]
fn test_module_source() {
    let doc = Document::from_yaml(WEBHOOKS).unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();
    let config = GeneratorConfig::default();

    let modules = Generator::new(config.clone(), &English)
        .generate(&ir)
        .unwrap();
    let module = RubyModule::new(&config, &English, &modules[0]);

    assert_eq!(module.path(), "lib/octokit/client/hooks.rb");
    assert_eq!(
        module.source(),
        indoc::indoc! {r##"
            # frozen_string_literal: true

            module Octokit
              class Client
                # Methods for the Hooks API
                #
                # @see https://docs.github.com/rest/repos/webhooks
                module Hooks
                  # List repository webhooks
                  #
                  # @param repo [Integer, String, Repository, Hash] A GitHub repository
                  # @return [Array<Sawyer::Resource>] A list of webhooks
                  # @see https://docs.github.com/rest/repos/webhooks#list-repository-webhooks
                  def webhooks(repo, options = {})
                    paginate "#{Repository.path repo}/hooks", options
                  end

                  # Delete a repository webhook
                  #
                  # @param repo [Integer, String, Repository, Hash] A GitHub repository
                  # @param hook_id [Integer] The ID of the hook
                  # @return [Boolean] True on success, false otherwise
                  # @see https://docs.github.com/rest/repos/webhooks#delete-a-repository-webhook
                  def delete_webhook(repo, hook_id, options = {})
                    boolean_from_response :delete, "#{Repository.path repo}/hooks/#{hook_id}", options
                  end

                  # List org webhooks
                  #
                  # @param org [Integer, String] A GitHub organization id or login
                  # @return [Array<Sawyer::Resource>] A list of org webhooks
                  # @see https://docs.github.com/rest/orgs/webhooks#list-organization-webhooks
                  def org_webhooks(org, options = {})
                    paginate "#{Organization.path org}/hooks", options
                  end
                end
              end
            end
        "##}
    );
}

#[test]
fn test_custom_client_module() {
    let doc = Document::from_yaml(WEBHOOKS).unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();
    let config = GeneratorConfig {
        client_module: "GitHubEnterprise".to_owned(),
        ..Default::default()
    };

    let modules = Generator::new(config.clone(), &English)
        .generate(&ir)
        .unwrap();
    let module = RubyModule::new(&config, &English, &modules[1]);

    assert_eq!(module.path(), "lib/git_hub_enterprise/client/labels.rb");
    assert!(module.source().contains("module GitHubEnterprise\n  class Client\n"));
    assert!(module.source().contains("    module Labels\n"));
}

#[test]
fn test_index_source() {
    let doc = Document::from_yaml(WEBHOOKS).unwrap();
    let ir = IrSpec::from_doc(&doc).unwrap();
    let config = GeneratorConfig::default();

    let modules = Generator::new(config.clone(), &English)
        .generate(&ir)
        .unwrap();
    let index = RubyIndex::new(&config, &modules);

    assert_eq!(index.path(), "lib/octokit/client/generated.rb");
    assert_eq!(
        index.source(),
        indoc::indoc! {"
            # frozen_string_literal: true

            require 'octokit/client/hooks'
            require 'octokit/client/labels'
        "}
    );
}
